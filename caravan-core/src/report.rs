//! Human-readable solution reporting.
//!
//! Output is transient console text; no machine-readable schema is
//! guaranteed.

use std::fmt;

use crate::decode::Solution;

/// How the per-vehicle distances are aggregated in the report footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Aggregate {
    /// Sum across vehicles (total travelled distance).
    #[default]
    Sum,
    /// Longest single route (makespan-style reading).
    Max,
}

/// `Display` wrapper rendering a [`Solution`] as per-vehicle route lines.
///
/// # Examples
/// ```
/// use caravan_core::{DecodedRoute, Solution, SolutionReport};
///
/// let solution = Solution {
///     routes: vec![DecodedRoute { stops: vec![1, 4, 1], distance: 12 }],
///     total_distance: 12,
/// };
/// let text = SolutionReport::new(&solution).to_string();
/// assert!(text.contains("1 -> 4 -> 1"));
/// assert!(text.contains("Total route distance: 12"));
/// ```
#[derive(Debug)]
pub struct SolutionReport<'a> {
    solution: &'a Solution,
    separator: &'a str,
    aggregate: Aggregate,
}

impl<'a> SolutionReport<'a> {
    /// Report with the default `" -> "` separator and sum aggregate.
    pub fn new(solution: &'a Solution) -> Self {
        Self {
            solution,
            separator: " -> ",
            aggregate: Aggregate::default(),
        }
    }

    /// Overrides the separator between node ids.
    pub fn with_separator(mut self, separator: &'a str) -> Self {
        self.separator = separator;
        self
    }

    /// Overrides the aggregate in the footer line.
    pub fn with_aggregate(mut self, aggregate: Aggregate) -> Self {
        self.aggregate = aggregate;
        self
    }
}

impl fmt::Display for SolutionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (vehicle, route) in self.solution.routes.iter().enumerate() {
            writeln!(f, "Route for vehicle {vehicle}:")?;
            let mut stops = route.stops.iter();
            if let Some(first) = stops.next() {
                write!(f, "{first}")?;
                for stop in stops {
                    write!(f, "{}{stop}", self.separator)?;
                }
            }
            writeln!(f)?;
            writeln!(f, "Distance of the route: {}", route.distance)?;
        }
        match self.aggregate {
            Aggregate::Sum => {
                writeln!(f, "Total route distance: {}", self.solution.total_distance)
            }
            Aggregate::Max => {
                let longest = self
                    .solution
                    .routes
                    .iter()
                    .map(|route| route.distance)
                    .max()
                    .unwrap_or(0);
                writeln!(f, "Longest route distance: {longest}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodedRoute;
    use rstest::{fixture, rstest};

    #[fixture]
    fn solution() -> Solution {
        Solution {
            routes: vec![
                DecodedRoute {
                    stops: vec![1, 5, 3, 1],
                    distance: 40,
                },
                DecodedRoute {
                    stops: vec![1, 1],
                    distance: 0,
                },
            ],
            total_distance: 40,
        }
    }

    #[rstest]
    fn renders_routes_and_sum(solution: Solution) {
        let text = SolutionReport::new(&solution).to_string();
        assert!(text.contains("Route for vehicle 0:"));
        assert!(text.contains("1 -> 5 -> 3 -> 1"));
        assert!(text.contains("Distance of the route: 40"));
        assert!(text.contains("Route for vehicle 1:"));
        assert!(text.contains("Total route distance: 40"));
    }

    #[rstest]
    fn renders_max_aggregate(solution: Solution) {
        let text = SolutionReport::new(&solution)
            .with_aggregate(Aggregate::Max)
            .to_string();
        assert!(text.contains("Longest route distance: 40"));
        assert!(!text.contains("Total route distance"));
    }

    #[rstest]
    fn custom_separator(solution: Solution) {
        let text = SolutionReport::new(&solution).with_separator(" | ").to_string();
        assert!(text.contains("1 | 5 | 3 | 1"));
    }
}
