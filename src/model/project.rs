//! Immutable NRP instance and its validating builder.

use crate::error::{NrpError, Result};

/// A Next Release Problem instance.
///
/// Requirements carry an integer cost plus a cost risk and worst-case
/// cost; customers carry an integer profit plus a profit risk and the
/// list of requirements they declare. `precedents(r)` lists the
/// requirements that must also be built whenever `r` is built.
///
/// The precedence relation is guaranteed acyclic and every index is in
/// range: [`ProjectBuilder::build`] rejects anything else.
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    requirement_costs: Vec<i64>,
    requirement_cost_risks: Vec<f64>,
    requirement_worst_costs: Vec<f64>,
    precedents: Vec<Vec<usize>>,
    customer_profits: Vec<i64>,
    customer_profit_risks: Vec<f64>,
    customer_requirements: Vec<Vec<usize>>,
}

impl Project {
    /// Instance name (informational).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn requirement_count(&self) -> usize {
        self.requirement_costs.len()
    }

    pub fn customer_count(&self) -> usize {
        self.customer_profits.len()
    }

    pub fn requirement_cost(&self, requirement: usize) -> i64 {
        self.requirement_costs[requirement]
    }

    pub fn requirement_cost_risk(&self, requirement: usize) -> f64 {
        self.requirement_cost_risks[requirement]
    }

    pub fn requirement_worst_cost(&self, requirement: usize) -> f64 {
        self.requirement_worst_costs[requirement]
    }

    /// Requirements that must be built together with `requirement`.
    pub fn precedents(&self, requirement: usize) -> &[usize] {
        &self.precedents[requirement]
    }

    pub fn requirement_has_precedents(&self, requirement: usize) -> bool {
        !self.precedents[requirement].is_empty()
    }

    pub fn customer_profit(&self, customer: usize) -> i64 {
        self.customer_profits[customer]
    }

    pub fn customer_profit_risk(&self, customer: usize) -> f64 {
        self.customer_profit_risks[customer]
    }

    /// Requirements declared by `customer` (without precedents).
    pub fn customer_requirements(&self, customer: usize) -> &[usize] {
        &self.customer_requirements[customer]
    }

    pub fn total_cost(&self) -> i64 {
        self.requirement_costs.iter().sum()
    }

    pub fn total_profit(&self) -> i64 {
        self.customer_profits.iter().sum()
    }

    pub fn total_cost_risk(&self) -> f64 {
        self.requirement_cost_risks.iter().sum()
    }

    pub fn total_profit_risk(&self) -> f64 {
        self.customer_profit_risks.iter().sum()
    }

    /// Marks every requirement needed by the selected customers,
    /// precedents included. Computed from scratch; used as a cross-check
    /// for the incremental solution state.
    pub fn required_by(&self, selection: &[bool]) -> Vec<bool> {
        debug_assert_eq!(selection.len(), self.customer_count());
        let mut required = vec![false; self.requirement_count()];
        let mut stack = Vec::new();

        for (customer, _) in selection.iter().enumerate().filter(|&(_, &s)| s) {
            stack.extend_from_slice(&self.customer_requirements[customer]);
            while let Some(r) = stack.pop() {
                if !required[r] {
                    required[r] = true;
                    stack.extend_from_slice(&self.precedents[r]);
                }
            }
        }
        required
    }

    pub fn calculate_cost(&self, selection: &[bool]) -> i64 {
        self.required_by(selection)
            .iter()
            .zip(&self.requirement_costs)
            .filter(|&(&req, _)| req)
            .map(|(_, &c)| c)
            .sum()
    }

    pub fn calculate_cost_risk(&self, selection: &[bool]) -> f64 {
        self.sum_required(selection, |r| self.requirement_cost_risks[r])
    }

    pub fn calculate_worst_cost(&self, selection: &[bool]) -> f64 {
        self.sum_required(selection, |r| self.requirement_worst_costs[r])
    }

    pub fn calculate_profit(&self, selection: &[bool]) -> i64 {
        selection
            .iter()
            .zip(&self.customer_profits)
            .filter(|&(&s, _)| s)
            .map(|(_, &p)| p)
            .sum()
    }

    pub fn calculate_profit_risk(&self, selection: &[bool]) -> f64 {
        selection
            .iter()
            .zip(&self.customer_profit_risks)
            .filter(|&(&s, _)| s)
            .map(|(_, &p)| p)
            .sum()
    }

    fn sum_required<F: Fn(usize) -> f64>(&self, selection: &[bool], value: F) -> f64 {
        self.required_by(selection)
            .iter()
            .enumerate()
            .filter(|&(_, &req)| req)
            .map(|(r, _)| value(r))
            .sum()
    }
}

/// Incremental builder for [`Project`].
///
/// # Examples
///
/// ```
/// use nrp_search::model::ProjectBuilder;
///
/// let mut builder = ProjectBuilder::new("tiny");
/// let r1 = builder.add_requirement(10);
/// let r2 = builder.add_requirement(20);
/// builder.add_precedence(r2, r1); // building r1 also needs r2
/// builder.add_customer(100, [r1]);
/// builder.add_customer(50, [r2]);
/// let project = builder.build().unwrap();
///
/// assert_eq!(project.calculate_cost(&[true, false]), 30);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProjectBuilder {
    name: String,
    requirement_costs: Vec<i64>,
    precedents: Vec<Vec<usize>>,
    customer_profits: Vec<i64>,
    customer_requirements: Vec<Vec<usize>>,
    pending_precedences: Vec<(usize, usize)>,
    cost_estimates: Vec<(usize, f64, f64)>,
    profit_estimates: Vec<(usize, f64, f64)>,
}

impl ProjectBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a requirement and returns its index.
    pub fn add_requirement(&mut self, cost: i64) -> usize {
        self.requirement_costs.push(cost);
        self.precedents.push(Vec::new());
        self.requirement_costs.len() - 1
    }

    /// Declares that building `requirement` also requires `precedent`.
    ///
    /// Duplicate edges are ignored. Indices are checked by
    /// [`build`](Self::build).
    pub fn add_precedence(&mut self, precedent: usize, requirement: usize) -> &mut Self {
        self.pending_precedences.push((precedent, requirement));
        self
    }

    /// Adds a customer and returns its index.
    pub fn add_customer<I>(&mut self, profit: i64, requirements: I) -> usize
    where
        I: IntoIterator<Item = usize>,
    {
        self.customer_profits.push(profit);
        self.customer_requirements
            .push(requirements.into_iter().collect());
        self.customer_profits.len() - 1
    }

    /// Sets the cost estimate interval of a requirement. The cost risk
    /// becomes `(max - min) / 6` and the worst-case cost `max`.
    pub fn set_requirement_cost_estimates(
        &mut self,
        requirement: usize,
        min: f64,
        max: f64,
    ) -> &mut Self {
        self.cost_estimates.push((requirement, min, max));
        self
    }

    /// Sets the profit estimate interval of a customer. The profit risk
    /// becomes `(max - min) / 6`.
    pub fn set_customer_profit_estimates(&mut self, customer: usize, min: f64, max: f64) -> &mut Self {
        self.profit_estimates.push((customer, min, max));
        self
    }

    pub fn requirement_count(&self) -> usize {
        self.requirement_costs.len()
    }

    pub fn customer_count(&self) -> usize {
        self.customer_profits.len()
    }

    pub fn requirement_cost(&self, requirement: usize) -> Option<i64> {
        self.requirement_costs.get(requirement).copied()
    }

    pub fn customer_profit(&self, customer: usize) -> Option<i64> {
        self.customer_profits.get(customer).copied()
    }

    /// Validates indices and acyclicity and produces the project.
    pub fn build(self) -> Result<Project> {
        let requirement_count = self.requirement_costs.len();
        let customer_count = self.customer_profits.len();

        if customer_count == 0 {
            return Err(NrpError::EmptyProject);
        }

        let check_requirement = |index: usize| {
            if index < requirement_count {
                Ok(index)
            } else {
                Err(NrpError::RequirementOutOfRange {
                    index,
                    count: requirement_count,
                })
            }
        };

        let mut precedents = self.precedents;
        for &(precedent, requirement) in &self.pending_precedences {
            check_requirement(precedent)?;
            check_requirement(requirement)?;
            if !precedents[requirement].contains(&precedent) {
                precedents[requirement].push(precedent);
            }
        }

        for requirements in &self.customer_requirements {
            for &r in requirements {
                check_requirement(r)?;
            }
        }

        if let Some(requirement) = find_cycle(&precedents) {
            return Err(NrpError::PrecedenceCycle { requirement });
        }

        let mut requirement_cost_risks = vec![0.0; requirement_count];
        let mut requirement_worst_costs: Vec<f64> =
            self.requirement_costs.iter().map(|&c| c as f64).collect();
        for &(r, min, max) in &self.cost_estimates {
            check_requirement(r)?;
            if min > max {
                return Err(NrpError::InvalidEstimate {
                    what: "requirement",
                    index: r,
                    min,
                    max,
                });
            }
            requirement_cost_risks[r] = (max - min) / 6.0;
            requirement_worst_costs[r] = max;
        }

        let mut customer_profit_risks = vec![0.0; customer_count];
        for &(c, min, max) in &self.profit_estimates {
            if c >= customer_count {
                return Err(NrpError::CustomerOutOfRange {
                    index: c,
                    count: customer_count,
                });
            }
            if min > max {
                return Err(NrpError::InvalidEstimate {
                    what: "customer",
                    index: c,
                    min,
                    max,
                });
            }
            customer_profit_risks[c] = (max - min) / 6.0;
        }

        Ok(Project {
            name: self.name,
            requirement_costs: self.requirement_costs,
            requirement_cost_risks,
            requirement_worst_costs,
            precedents,
            customer_profits: self.customer_profits,
            customer_profit_risks,
            customer_requirements: self.customer_requirements,
        })
    }
}

/// Returns a requirement lying on a precedence cycle, if any.
fn find_cycle(precedents: &[Vec<usize>]) -> Option<usize> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        New,
        Open,
        Done,
    }

    let mut marks = vec![Mark::New; precedents.len()];
    // (node, next edge position)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..precedents.len() {
        if marks[root] != Mark::New {
            continue;
        }
        marks[root] = Mark::Open;
        stack.push((root, 0));

        while let Some(top) = stack.last_mut() {
            let node = top.0;
            if let Some(&next) = precedents[node].get(top.1) {
                top.1 += 1;
                match marks[next] {
                    Mark::Open => return Some(next),
                    Mark::New => {
                        marks[next] = Mark::Open;
                        stack.push((next, 0));
                    }
                    Mark::Done => {}
                }
            } else {
                marks[node] = Mark::Done;
                stack.pop();
            }
        }
    }
    None
}
