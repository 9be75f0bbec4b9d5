//! PACE `.gr` / DIMACS `.dgf` graph reader.
//!
//! Both dialects are line-oriented text sharing one grammar: a `c`
//! comment line, a single `p tw n m` (PACE) or `p edge n m` (DIMACS)
//! header declaring the vertex/edge counts, then one edge per line -
//! `u v` in PACE, `e u v` in DIMACS. `n`/`d`/`v`/`x`/`b`/`l`-prefixed
//! lines are DIMACS node-property extensions this system has no use
//! for and tolerates silently. The decomposition writer is not here:
//! `TreeDecomposition::to_pace_string`/`to_tikz_string` already live on
//! the type itself in the root crate, so there is nothing to wrap.

use std::io::Read;
use treewidth::{Graph, TreewidthError, VertexId};

const IGNORED_PREFIXES: [&str; 6] = ["n", "d", "v", "x", "b", "l"];

fn malformed(line: usize, message: impl Into<String>) -> TreewidthError {
    TreewidthError::InputFormat {
        line,
        message: message.into(),
    }
}

fn parse_count(token: Option<&str>, line: usize, what: &str) -> Result<usize, TreewidthError> {
    token
        .ok_or_else(|| malformed(line, format!("missing {what}")))?
        .parse::<usize>()
        .map_err(|_| malformed(line, format!("{what} is not a non-negative integer")))
}

fn parse_endpoint(
    token: Option<&str>,
    line: usize,
    n: usize,
) -> Result<VertexId, TreewidthError> {
    let value = parse_count(token, line, "edge endpoint")?;
    if value == 0 || value > n {
        return Err(malformed(
            line,
            format!("edge endpoint {value} out of range 1..={n}"),
        ));
    }
    Ok(VertexId::new(value as u32))
}

fn add_edge_line(
    graph: &mut Graph,
    declared_n: Option<usize>,
    u_token: Option<&str>,
    v_token: Option<&str>,
    line: usize,
) -> Result<(), TreewidthError> {
    let n = declared_n.ok_or_else(|| malformed(line, "edge line before the 'p' header"))?;
    let u = parse_endpoint(u_token, line, n)?;
    let v = parse_endpoint(v_token, line, n)?;
    if u == v {
        return Err(malformed(line, "self-loops are not permitted"));
    }
    if graph.is_adjacent(u, v) {
        log::warn!("line {line}: duplicate edge {} {} ignored", u, v);
        return Ok(());
    }
    graph.add_edge(u, v);
    Ok(())
}

/// Parses a PACE/DIMACS text graph from a string already read into memory.
pub fn parse_graph(input: &str) -> Result<Graph, TreewidthError> {
    let mut graph = Graph::new();
    let mut declared_n: Option<usize> = None;

    for (index, raw_line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let head = tokens.next().expect("non-empty line has a first token");

        match head {
            "c" => continue,
            "p" => {
                let format = tokens
                    .next()
                    .ok_or_else(|| malformed(line_no, "missing format after 'p'"))?;
                if format != "tw" && format != "edge" {
                    return Err(malformed(line_no, format!("unknown p-line format '{format}'")));
                }
                let n = parse_count(tokens.next(), line_no, "vertex count")?;
                let _m = parse_count(tokens.next(), line_no, "edge count")?;
                for v in 1..=n {
                    graph.add_vertex(VertexId::new(v as u32));
                }
                declared_n = Some(n);
            }
            "e" => add_edge_line(&mut graph, declared_n, tokens.next(), tokens.next(), line_no)?,
            prefix if IGNORED_PREFIXES.contains(&prefix) => continue,
            _ if head.chars().all(|c| c.is_ascii_digit()) => {
                add_edge_line(&mut graph, declared_n, Some(head), tokens.next(), line_no)?
            }
            other => {
                return Err(malformed(line_no, format!("unrecognized line prefix '{other}'")));
            }
        }
    }

    if declared_n.is_none() {
        return Err(malformed(0, "input has no 'p' header"));
    }

    Ok(graph)
}

/// Reads and parses a graph from any `Read` source (stdin, a file, ...).
pub fn read_graph<R: Read>(mut reader: R) -> Result<Graph, TreewidthError> {
    let mut buffer = String::new();
    reader
        .read_to_string(&mut buffer)
        .map_err(|e| malformed(0, format!("I/O error: {e}")))?;
    parse_graph(&buffer)
}
