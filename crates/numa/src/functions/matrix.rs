//! Matrix construction and selection functions.

use numa_dispatch::{Callee, Dispatcher, Signature};
use numa_matrix::{column, concat, kron, matrix_from_columns, matrix_from_rows, row, ScalarOp};
use numa_value::{
    rank_mismatch, type_mismatch, DenseMatrix, Kind, MathResult, SparseMatrix, Storage, Value,
};

use super::{index_arg, unexpected_args};
use crate::config::MathConfig;

pub(super) fn register(dispatcher: &mut Dispatcher, config: &MathConfig) -> MathResult<()> {
    let storage = config.matrix;
    let number = config.number;

    dispatcher.register(
        "matrix",
        vec![
            Signature::parse("", move |_, _| empty(storage))?,
            Signature::parse("Matrix", move |callee, args| match args {
                [m] => convert_storage(m, storage),
                _ => Err(unexpected_args(callee, args)),
            })?,
            Signature::parse("Matrix, string", |callee, args| match args {
                [m, Value::Text(name)] => convert_storage(m, storage_named(name)?),
                _ => Err(unexpected_args(callee, args)),
            })?,
        ],
    )?;
    dispatcher.register(
        "zeros",
        vec![
            Signature::parse("", move |_, _| zeros(&[0], storage, number))?,
            Signature::parse("...number | bigint", move |_, args| {
                let size = args
                    .iter()
                    .map(|arg| index_arg("zeros", arg))
                    .collect::<MathResult<Vec<_>>>()?;
                zeros(&size, storage, number)
            })?,
        ],
    )?;

    dispatcher.register(
        "row",
        vec![Signature::parse("Matrix, number | bigint", |callee, args| {
            match args {
                [m, i] => row(m, index_arg("row", i)?),
                _ => Err(unexpected_args(callee, args)),
            }
        })?],
    )?;
    dispatcher.register(
        "column",
        vec![Signature::parse("Matrix, number | bigint", |callee, args| {
            match args {
                [m, j] => column(m, index_arg("column", j)?),
                _ => Err(unexpected_args(callee, args)),
            }
        })?],
    )?;

    dispatcher.register(
        "concat",
        vec![
            Signature::parse("...string", |_, args| {
                let joined: String = args.iter().filter_map(Value::as_str).collect();
                Ok(Value::text(joined))
            })?,
            Signature::parse("...any", concat_values)?,
        ],
    )?;
    dispatcher.register(
        "kron",
        vec![Signature::parse("Matrix, Matrix", |callee, args| match args {
            [a, b] => {
                let multiply = ScalarOp::new(callee.dispatcher(), "dotMultiply")?;
                kron(multiply, a, b).map(Value::dense)
            }
            _ => Err(unexpected_args(callee, args)),
        })?],
    )?;
    dispatcher.register(
        "matrixFromRows",
        vec![Signature::parse("...Matrix", |_, args| {
            matrix_from_rows(args).map(Value::dense)
        })?],
    )?;
    dispatcher.register(
        "matrixFromColumns",
        vec![Signature::parse("...Matrix", |_, args| {
            matrix_from_columns(args).map(Value::dense)
        })?],
    )?;
    Ok(())
}

fn empty(storage: Storage) -> MathResult {
    match storage {
        Storage::Dense => DenseMatrix::from_vec(Vec::new()).map(Value::dense),
        Storage::Sparse => Ok(Value::sparse(SparseMatrix::zeros(0, 0, None))),
    }
}

fn storage_named(name: &str) -> MathResult<Storage> {
    match name {
        "dense" => Ok(Storage::Dense),
        "sparse" => Ok(Storage::Sparse),
        _ => Err(type_mismatch("\"dense\" or \"sparse\"", name)),
    }
}

fn convert_storage(value: &Value, storage: Storage) -> MathResult {
    match (value, storage) {
        (Value::Dense(_), Storage::Dense) | (Value::Sparse(_), Storage::Sparse) => {
            Ok(value.clone())
        }
        (Value::Dense(m), Storage::Sparse) => m.to_sparse().map(Value::sparse),
        (Value::Sparse(m), Storage::Dense) => Ok(Value::dense(m.to_dense())),
        _ => Err(type_mismatch("Matrix", value.type_name())),
    }
}

/// Zero matrix of `size`, filled with the configured number kind.
fn zeros(size: &[usize], storage: Storage, number: Kind) -> MathResult {
    match storage {
        Storage::Dense => DenseMatrix::zeros(size, number).map(Value::dense),
        Storage::Sparse => match *size {
            [rows, columns] => Ok(Value::sparse(SparseMatrix::zeros(
                rows,
                columns,
                Some(number),
            ))),
            [0] => Ok(Value::sparse(SparseMatrix::zeros(0, 0, Some(number)))),
            _ => Err(rank_mismatch(size.len(), 2)),
        },
    }
}

/// `concat(A, B, ..., dim?)`: a trailing number selects the dimension.
fn concat_values(callee: &Callee<'_>, args: &[Value]) -> MathResult {
    let (operands, dim) = match args {
        [operands @ .., last] if !last.is_matrix() && !operands.is_empty() => {
            (operands, Some(index_arg(callee.name(), last)?))
        }
        _ => (args, None),
    };
    if let Some(scalar) = operands.iter().find(|operand| !operand.is_matrix()) {
        return Err(type_mismatch("Matrix", scalar.type_name()));
    }
    concat(operands, dim).map(Value::dense)
}
