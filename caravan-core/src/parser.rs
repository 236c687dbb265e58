//! Parser for the fixed positional CVRPLIB-style instance layout.
//!
//! The layout is positional, not keyword-driven:
//!
//! ```text
//! line 0        NAME : <name>
//! line 3        DIMENSION : <n>
//! line 4        EDGE_WEIGHT_TYPE : <tag>
//! line 5        CAPACITY : <c>
//! lines 7..7+n  <id> <x> <y>
//! one separator line
//! n lines       <id> <demand>
//! one separator line
//! one line      <depot id>
//! ```
//!
//! Parsing either yields a fully validated [`Instance`] or a [`FormatError`];
//! no partially populated instance ever escapes.

use std::collections::HashMap;

use geo::Coord;
use thiserror::Error;

use crate::instance::{Instance, InstanceError, Node, NodeId};

const NAME_LINE: usize = 0;
const DIMENSION_LINE: usize = 3;
const EDGE_WEIGHT_TYPE_LINE: usize = 4;
const CAPACITY_LINE: usize = 5;
const COORD_START_LINE: usize = 7;

/// Errors returned by [`parse_instance`].
///
/// Line numbers in messages are 1-based, matching how editors display the
/// instance file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The file had no lines at all.
    #[error("instance file is empty")]
    Empty,
    /// A positional line the layout requires is absent.
    #[error("line {line} is missing; the file is truncated")]
    MissingLine { line: usize },
    /// A header line had no `:`-separated value.
    #[error("line {line}: no value after ':' for {field}")]
    MissingHeaderValue { line: usize, field: &'static str },
    /// An integer field failed to parse.
    #[error("line {line}: invalid {field} {value:?}")]
    InvalidInteger {
        line: usize,
        field: &'static str,
        value: String,
    },
    /// A node or demand row had too few columns.
    #[error("line {line}: expected {expected}")]
    MalformedRow { line: usize, expected: &'static str },
    /// The dimension field was zero.
    #[error("dimension must be positive")]
    ZeroDimension,
    /// The same node id appeared in two coordinate rows.
    #[error("line {line}: duplicate node id {id}")]
    DuplicateNodeId { line: usize, id: NodeId },
    /// A demand row referenced an id with no coordinate row.
    #[error("line {line}: demand for unknown node id {id}")]
    UnknownDemandId { line: usize, id: NodeId },
    /// A coordinate row never received a demand row.
    #[error("no demand entry for node {id}")]
    MissingDemand { id: NodeId },
    /// The assembled instance failed model validation.
    #[error("instance validation failed: {0}")]
    Invalid(#[from] InstanceError),
}

/// Parses file content in the fixed positional layout into an [`Instance`].
///
/// # Examples
/// ```
/// let text = "\
/// NAME : tiny
/// COMMENT : none
/// TYPE : CVRP
/// DIMENSION : 2
/// EDGE_WEIGHT_TYPE : EUC_2D
/// CAPACITY : 10
/// NODE_COORD_SECTION
/// 1 0 0
/// 2 3 4
/// DEMAND_SECTION
/// 1 0
/// 2 7
/// DEPOT_SECTION
/// 1
/// ";
/// let instance = caravan_core::parse_instance(text)?;
/// assert_eq!(instance.name(), "tiny");
/// assert_eq!(instance.node_count(), 2);
/// assert_eq!(instance.depot(), 1);
/// # Ok::<(), caravan_core::FormatError>(())
/// ```
pub fn parse_instance(text: &str) -> Result<Instance, FormatError> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        return Err(FormatError::Empty);
    }

    let name = header_value(&lines, NAME_LINE, "name")?;
    let dimension: usize = int_header(&lines, DIMENSION_LINE, "dimension")?;
    if dimension == 0 {
        return Err(FormatError::ZeroDimension);
    }
    let edge_weight_type = header_value(&lines, EDGE_WEIGHT_TYPE_LINE, "edge weight type")?;
    let capacity: i64 = int_header(&lines, CAPACITY_LINE, "capacity")?;
    log::debug!("parsing instance {name}: dimension {dimension}, capacity {capacity}");

    let mut nodes = Vec::with_capacity(dimension);
    let mut index_of: HashMap<NodeId, usize> = HashMap::with_capacity(dimension);
    for offset in 0..dimension {
        let index = COORD_START_LINE + offset;
        let row = line(&lines, index)?;
        let mut columns = row.split_whitespace();
        let (Some(id), Some(x), Some(y)) = (columns.next(), columns.next(), columns.next()) else {
            return Err(FormatError::MalformedRow {
                line: index + 1,
                expected: "a node row of the form `id x y`",
            });
        };
        let id: NodeId = int_column(id, index, "node id")?;
        let x: i64 = int_column(x, index, "x coordinate")?;
        let y: i64 = int_column(y, index, "y coordinate")?;
        if index_of.insert(id, nodes.len()).is_some() {
            return Err(FormatError::DuplicateNodeId {
                line: index + 1,
                id,
            });
        }
        nodes.push(Node {
            id,
            position: Coord { x, y },
            demand: 0,
        });
    }

    // One separator line sits between the coordinate and demand sections.
    let demand_start = COORD_START_LINE + dimension + 1;
    let mut assigned = vec![false; dimension];
    for offset in 0..dimension {
        let index = demand_start + offset;
        let row = line(&lines, index)?;
        let mut columns = row.split_whitespace();
        let (Some(id), Some(demand)) = (columns.next(), columns.next()) else {
            return Err(FormatError::MalformedRow {
                line: index + 1,
                expected: "a demand row of the form `id demand`",
            });
        };
        let id: NodeId = int_column(id, index, "node id")?;
        let demand: i64 = int_column(demand, index, "demand")?;
        let Some(&node_index) = index_of.get(&id) else {
            return Err(FormatError::UnknownDemandId {
                line: index + 1,
                id,
            });
        };
        nodes[node_index].demand = demand;
        assigned[node_index] = true;
    }
    if let Some(unassigned) = assigned.iter().position(|covered| !covered) {
        return Err(FormatError::MissingDemand {
            id: nodes[unassigned].id,
        });
    }

    let depot_line = demand_start + dimension + 1;
    let depot_row = line(&lines, depot_line)?;
    let depot: NodeId = int_column(depot_row.trim(), depot_line, "depot id")?;

    Ok(Instance::new(name, edge_weight_type, capacity, depot, nodes)?)
}

fn line<'a>(lines: &[&'a str], index: usize) -> Result<&'a str, FormatError> {
    lines
        .get(index)
        .copied()
        .ok_or(FormatError::MissingLine { line: index + 1 })
}

fn header_value<'a>(
    lines: &[&'a str],
    index: usize,
    field: &'static str,
) -> Result<&'a str, FormatError> {
    let row = line(lines, index)?;
    row.split_once(':')
        .map(|(_, value)| value.trim())
        .ok_or(FormatError::MissingHeaderValue {
            line: index + 1,
            field,
        })
}

fn int_header<T: std::str::FromStr>(
    lines: &[&str],
    index: usize,
    field: &'static str,
) -> Result<T, FormatError> {
    int_column(header_value(lines, index, field)?, index, field)
}

fn int_column<T: std::str::FromStr>(
    raw: &str,
    index: usize,
    field: &'static str,
) -> Result<T, FormatError> {
    raw.parse().map_err(|_| FormatError::InvalidInteger {
        line: index + 1,
        field,
        value: raw.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // P-n20-k2 shaped fixture: 20 nodes, capacity 160, depot 1.
    const SAMPLE: &str = "\
NAME : P-n20-k2
COMMENT : (Augerat et al)
TYPE : CVRP
DIMENSION : 20
EDGE_WEIGHT_TYPE : EUC_2D
CAPACITY : 160
NODE_COORD_SECTION
1 30 40
2 37 52
3 49 49
4 52 64
5 31 62
6 52 33
7 42 41
8 52 41
9 57 58
10 62 42
11 42 57
12 27 68
13 43 67
14 58 48
15 58 27
16 37 69
17 38 46
18 61 33
19 62 63
20 63 69
DEMAND_SECTION
1 0
2 7
3 30
4 16
5 23
6 11
7 19
8 15
9 28
10 8
11 8
12 7
13 14
14 6
15 19
16 11
17 12
18 26
19 17
20 6
DEPOT_SECTION
1
EOF
";

    #[rstest]
    fn parses_well_formed_instance() {
        let instance = parse_instance(SAMPLE).expect("well-formed instance");
        assert_eq!(instance.name(), "P-n20-k2");
        assert_eq!(instance.edge_weight_type(), "EUC_2D");
        assert_eq!(instance.node_count(), 20);
        assert_eq!(instance.capacity(), 160);
        assert_eq!(instance.depot(), 1);
        assert_eq!(instance.node(2).map(|node| node.position.x), Some(37));
        assert_eq!(instance.node(3).map(|node| node.demand), Some(30));
    }

    #[rstest]
    fn empty_file_fails() {
        assert_eq!(parse_instance(""), Err(FormatError::Empty));
    }

    #[rstest]
    fn truncated_coordinate_section_fails() {
        // Drop the last coordinate row: dimension says 20, only 19 present.
        // The row that should hold node 20 now holds "DEMAND_SECTION", which
        // is not an `id x y` triple.
        let truncated: String = SAMPLE
            .lines()
            .filter(|row| *row != "20 63 69")
            .map(|row| format!("{row}\n"))
            .collect();
        let err = parse_instance(&truncated).expect_err("truncated file");
        assert!(
            matches!(
                err,
                FormatError::MalformedRow { .. } | FormatError::InvalidInteger { .. }
            ),
            "unexpected error: {err}"
        );
    }

    #[rstest]
    fn truncated_demand_section_fails() {
        let truncated: String = SAMPLE
            .lines()
            .take_while(|row| *row != "9 28")
            .map(|row| format!("{row}\n"))
            .collect();
        let err = parse_instance(&truncated).expect_err("truncated file");
        assert_eq!(err, FormatError::MissingLine { line: 37 });
    }

    #[rstest]
    fn unparseable_dimension_fails() {
        let broken = SAMPLE.replace("DIMENSION : 20", "DIMENSION : twenty");
        let err = parse_instance(&broken).expect_err("bad dimension");
        assert_eq!(
            err,
            FormatError::InvalidInteger {
                line: 4,
                field: "dimension",
                value: "twenty".to_owned(),
            }
        );
    }

    #[rstest]
    fn zero_dimension_fails() {
        let broken = SAMPLE.replace("DIMENSION : 20", "DIMENSION : 0");
        assert_eq!(parse_instance(&broken), Err(FormatError::ZeroDimension));
    }

    #[rstest]
    fn demand_for_unknown_id_fails() {
        let broken = SAMPLE.replace("\n20 6\n", "\n77 6\n");
        let err = parse_instance(&broken).expect_err("unknown demand id");
        assert_eq!(err, FormatError::UnknownDemandId { line: 48, id: 77 });
    }

    #[rstest]
    fn duplicate_coordinate_id_fails() {
        let broken = SAMPLE.replace("\n20 63 69\n", "\n19 63 69\n");
        let err = parse_instance(&broken).expect_err("duplicate id");
        assert_eq!(err, FormatError::DuplicateNodeId { line: 27, id: 19 });
    }

    #[rstest]
    fn missing_depot_id_fails() {
        let broken = SAMPLE.replace("DEPOT_SECTION\n1\n", "DEPOT_SECTION\n99\n");
        let err = parse_instance(&broken).expect_err("depot absent");
        assert_eq!(
            err,
            FormatError::Invalid(InstanceError::DepotNotFound { id: 99 })
        );
    }

    #[rstest]
    fn header_without_colon_fails() {
        let broken = SAMPLE.replace("CAPACITY : 160", "CAPACITY 160");
        let err = parse_instance(&broken).expect_err("no colon");
        assert_eq!(
            err,
            FormatError::MissingHeaderValue {
                line: 6,
                field: "capacity",
            }
        );
    }
}
