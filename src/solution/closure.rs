//! Per-customer requirement closures.

use crate::model::Project;

/// For each customer, the deduplicated set of requirements reachable
/// from its declared requirements through zero or more precedence edges.
///
/// Rows are stored back to back in one index vector (`offsets[c]..offsets[c + 1]`).
/// The table is immutable once built and is shared between a solution
/// and all of its clones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureTable {
    offsets: Vec<usize>,
    requirements: Vec<usize>,
}

impl ClosureTable {
    /// Builds every customer's closure by iterative depth-first expansion.
    ///
    /// A visited bitset sized to the requirement count guarantees each
    /// requirement enters a row at most once. Only the bits touched by a
    /// row are cleared before the next one.
    pub fn new(project: &Project) -> Self {
        let customer_count = project.customer_count();
        let mut offsets = Vec::with_capacity(customer_count + 1);
        let mut requirements = Vec::new();
        let mut visited = vec![false; project.requirement_count()];
        let mut stack: Vec<usize> = Vec::new();

        offsets.push(0);
        for customer in 0..customer_count {
            let row_start = requirements.len();

            // Reverse so that declared requirements are expanded in order.
            stack.extend(project.customer_requirements(customer).iter().rev());
            while let Some(r) = stack.pop() {
                if visited[r] {
                    continue;
                }
                visited[r] = true;
                requirements.push(r);
                stack.extend(project.precedents(r).iter().rev());
            }

            for &r in &requirements[row_start..] {
                visited[r] = false;
            }
            offsets.push(requirements.len());
        }

        Self {
            offsets,
            requirements,
        }
    }

    pub fn customer_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Requirements needed to attend `customer`.
    #[inline]
    pub fn customer_closure(&self, customer: usize) -> &[usize] {
        &self.requirements[self.offsets[customer]..self.offsets[customer + 1]]
    }

    /// Length of the longest row.
    pub fn max_closure_size(&self) -> usize {
        self.offsets
            .windows(2)
            .map(|w| w[1] - w[0])
            .max()
            .unwrap_or(0)
    }
}
