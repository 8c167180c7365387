//! DIMACS CNF I/O and the variable-map format
//!
//! CNF: header `p cnf <numVars> <numClauses>`, then one line per clause of
//! space-separated signed literals terminated by `0`. The variable map is a
//! sidecar file with one `<varId> <i+1> <j+1>` line per allocated cell,
//! letting a caller decode a satisfying assignment back into a vertex
//! mapping.

use super::encoder::GiEncoding;
use super::instance::{Clause, SatInstance};
use super::variables::VarMap;
use anyhow::{Context, Result};
use itertools::Itertools;
use std::io::Write;
use std::path::Path;

/// Streams the encoding as DIMACS CNF into `writer`.
///
/// The header count comes from the independent counting pass, so the whole
/// file is produced in a single forward pass over the clause iterator.
pub fn write_cnf<W: Write>(encoding: &GiEncoding<'_>, writer: &mut W) -> Result<()> {
    writeln!(writer, "p cnf {} {}", encoding.num_vars(), encoding.num_clauses())?;
    for clause in encoding.clauses() {
        writeln!(writer, "{} 0", clause.literals.iter().join(" "))?;
    }
    Ok(())
}

/// Writes the variable map: one `<varId> <i+1> <j+1>` line per variable.
pub fn write_var_map<W: Write>(var_map: &VarMap, writer: &mut W) -> Result<()> {
    for (id, i, j) in var_map.entries() {
        writeln!(writer, "{} {} {}", id, i + 1, j + 1)?;
    }
    Ok(())
}

/// Saves CNF and variable map to files, creating parent directories.
///
/// Both failure paths of the encoder fire before a `GiEncoding` exists, so
/// by the time this runs no partial artifact can be left behind on error
/// short of the filesystem itself failing.
pub fn save_encoding_to_files<P: AsRef<Path>>(
    encoding: &GiEncoding<'_>,
    cnf_path: P,
    var_map_path: P,
) -> Result<()> {
    let mut cnf = create_file(cnf_path.as_ref())?;
    write_cnf(encoding, &mut cnf)
        .and_then(|_| cnf.flush().map_err(Into::into))
        .with_context(|| format!("Failed to write CNF file: {}", cnf_path.as_ref().display()))?;

    let mut map = create_file(var_map_path.as_ref())?;
    write_var_map(encoding.var_map(), &mut map)
        .and_then(|_| map.flush().map_err(Into::into))
        .with_context(|| {
            format!(
                "Failed to write variable map file: {}",
                var_map_path.as_ref().display()
            )
        })?;
    Ok(())
}

fn create_file(path: &Path) -> Result<std::io::BufWriter<std::fs::File>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    Ok(std::io::BufWriter::new(file))
}

/// Load a SAT instance from a DIMACS CNF file.
pub fn load_sat_from_file<P: AsRef<Path>>(path: P) -> Result<SatInstance> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read CNF file: {}", path.as_ref().display()))?;
    parse_dimacs_cnf(&content)
        .with_context(|| format!("Failed to parse CNF file: {}", path.as_ref().display()))
}

/// Parse DIMACS CNF text. Clauses may span lines; each must end in `0`.
pub fn parse_dimacs_cnf(content: &str) -> Result<SatInstance> {
    let mut lines = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('c'));

    let header = lines
        .next()
        .context("CNF file is empty or contains nothing but comments")?;
    let fields: Vec<&str> = header.split_whitespace().collect();
    if fields.len() != 4 || fields[0] != "p" || fields[1] != "cnf" {
        anyhow::bail!(
            "First non-comment line should read \"p cnf <numVars> <numClauses>\", but doesn't: {}",
            header
        );
    }
    let num_vars: usize = fields[2].parse().context("Invalid variable count in header")?;
    let num_clauses: usize = fields[3].parse().context("Invalid clause count in header")?;

    let mut sat = SatInstance::new(num_vars);
    let mut literals: Vec<i32> = Vec::new();
    for line in lines {
        for token in line.split_whitespace() {
            let literal: i32 = token
                .parse()
                .with_context(|| format!("Invalid literal '{}' in line: {}", token, line))?;
            if literal == 0 {
                sat.add_clause(Clause::new(std::mem::take(&mut literals)))
                    .context("Invalid clause in CNF file")?;
            } else {
                literals.push(literal);
            }
        }
    }
    if !literals.is_empty() {
        anyhow::bail!("CNF file ends inside a clause (missing terminating 0)");
    }
    if sat.num_clauses() != num_clauses {
        anyhow::bail!(
            "Header announces {} clauses but the file contains {}",
            num_clauses,
            sat.num_clauses()
        );
    }
    Ok(sat)
}
