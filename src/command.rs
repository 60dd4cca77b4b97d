use std::{
    fs,
    io::{Read, Write},
    path::Path,
    str::FromStr,
};

use image_patch::{Operation, OperationKind, PatchSet, PatchSetBuilder, UnrecognizedKind};
use serde_json::Value;

use crate::{
    config::{CliConfig, Command},
    error::{CliError, OpSpecError},
};

/// One operation given on the command line as `<op>:<path>[=<value>]`.
///
/// A value that does not parse as json is taken as a plain string, so
/// `replace:/name=cirros` and `replace:/name="cirros"` are the same. For `add`
/// and `replace` the path stops at the first `=`, so it cannot contain one.
#[derive(Debug, Clone, PartialEq)]
pub struct OpSpec(Operation);

impl FromStr for OpSpec {
    type Err = OpSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (op, rest) = s.split_once(':').ok_or_else(|| OpSpecError::MissingSeparator {
            spec: s.to_string(),
        })?;

        let kind = OperationKind::parse(Some(op));
        match kind {
            OperationKind::Remove => Ok(OpSpec(Operation::remove(rest))),
            OperationKind::Add | OperationKind::Replace => {
                let (path, raw) = rest.split_once('=').ok_or_else(|| OpSpecError::MissingValue {
                    op: kind.to_string(),
                })?;
                let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.into()));
                Ok(OpSpec(Operation::new(kind, path, Some(value))))
            }
            OperationKind::Unrecognized(_) => Err(OpSpecError::UnsupportedKind { op: op.into() }),
        }
    }
}

#[derive(Debug, Default, Eq, PartialEq)]
struct Summary {
    add: usize,
    replace: usize,
    remove: usize,
    unrecognized: usize,
    invalid_paths: usize,
}

pub fn run(config: &CliConfig, stdin: impl Read, mut out: impl Write) -> Result<(), CliError> {
    let unrecognized = UnrecognizedKind::from(config.unrecognized);

    match &config.command {
        Command::Check { file } => {
            let patch = read_patch(file.as_deref(), stdin)?;
            let summary = check(&patch);
            writeln!(
                out,
                "{} operations: {} add, {} replace, {} remove, {} unrecognized, {} invalid paths",
                patch.len(),
                summary.add,
                summary.replace,
                summary.remove,
                summary.unrecognized,
                summary.invalid_paths
            )?;
        }
        Command::Normalize { file } => {
            let patch = read_patch(file.as_deref(), stdin)?;
            write_patch(&mut out, &patch, unrecognized, config.pretty)?;
        }
        Command::Build { ops } => {
            let patch = PatchSetBuilder::new()
                .set_operations(ops.iter().map(|spec| spec.0.clone()))
                .build()?;
            tracing::debug!(operations = patch.len(), "built patch");
            write_patch(&mut out, &patch, unrecognized, config.pretty)?;
        }
    }

    Ok(())
}

fn read_patch(file: Option<&Path>, mut stdin: impl Read) -> Result<PatchSet, CliError> {
    let bytes = match file {
        Some(path) => {
            tracing::debug!(path = %path.display(), "reading patch");
            fs::read(path)?
        }
        None => {
            let mut bytes = Vec::new();
            stdin.read_to_end(&mut bytes)?;
            bytes
        }
    };

    Ok(PatchSet::from_slice(&bytes)?)
}

fn write_patch(
    out: &mut impl Write,
    patch: &PatchSet,
    unrecognized: UnrecognizedKind,
    pretty: bool,
) -> Result<(), CliError> {
    let value = patch.to_json_with(unrecognized);
    if pretty {
        serde_json::to_writer_pretty(&mut *out, &value)?;
    } else {
        serde_json::to_writer(&mut *out, &value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn check(patch: &PatchSet) -> Summary {
    let mut summary = Summary::default();

    for (index, op) in patch.iter().enumerate() {
        tracing::debug!(index, op = op.kind().as_str(), path = op.path(), "operation");

        match op.kind() {
            OperationKind::Add => summary.add += 1,
            OperationKind::Replace => summary.replace += 1,
            OperationKind::Remove => summary.remove += 1,
            OperationKind::Unrecognized(raw) => {
                summary.unrecognized += 1;
                tracing::warn!(index, op = ?raw, path = op.path(), "unrecognized operation kind");
            }
        }

        match op.pointer() {
            Ok(pointer) if pointer.is_root() => {
                tracing::warn!(index, "operation targets the whole image");
            }
            Ok(_) => {}
            Err(err) => {
                summary.invalid_paths += 1;
                tracing::warn!(index, error = %err, "path is not a json pointer");
            }
        }
    }

    summary
}
