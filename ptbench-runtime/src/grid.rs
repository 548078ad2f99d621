//! Parameter grids and their Cartesian expansion.

use crate::ParamValue;
use serde::{Deserialize, Serialize};

/// Ordered parameter axes. Each combination takes one value from every axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterGrid {
    axes: Vec<Vec<ParamValue>>,
}

impl ParameterGrid {
    pub fn new(axes: Vec<Vec<ParamValue>>) -> Self {
        Self { axes }
    }

    /// Append an axis, builder style.
    pub fn axis<I, T>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ParamValue>,
    {
        self.axes.push(values.into_iter().map(Into::into).collect());
        self
    }

    /// Number of combinations the grid expands to.
    pub fn len(&self) -> usize {
        self.axes.iter().map(Vec::len).product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All combinations in row-major order (last axis varies fastest).
    ///
    /// A grid without axes yields a single empty combination.
    pub fn combinations(&self) -> Vec<Vec<ParamValue>> {
        let mut combos: Vec<Vec<ParamValue>> = vec![Vec::with_capacity(self.axes.len())];

        for axis in &self.axes {
            let mut next = Vec::with_capacity(combos.len() * axis.len());
            for prefix in &combos {
                for value in axis {
                    let mut combo = prefix.clone();
                    combo.push(value.clone());
                    next.push(combo);
                }
            }
            combos = next;
        }

        combos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combinations_row_major() {
        let grid = ParameterGrid::default()
            .axis(["a", "b"])
            .axis([1i64, 2, 3]);

        let combos = grid.combinations();
        assert_eq!(grid.len(), 6);
        assert_eq!(combos.len(), 6);
        assert_eq!(combos[0], vec![ParamValue::from("a"), ParamValue::Int(1)]);
        assert_eq!(combos[2], vec![ParamValue::from("a"), ParamValue::Int(3)]);
        assert_eq!(combos[3], vec![ParamValue::from("b"), ParamValue::Int(1)]);
        assert_eq!(combos[5], vec![ParamValue::from("b"), ParamValue::Int(3)]);
    }

    #[test]
    fn test_no_axes_yields_one_empty_combination() {
        let grid = ParameterGrid::default();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.combinations(), vec![Vec::<ParamValue>::new()]);
    }

    #[test]
    fn test_empty_axis_yields_nothing() {
        let grid = ParameterGrid::default()
            .axis(["pt"])
            .axis(Vec::<i64>::new());
        assert!(grid.is_empty());
        assert!(grid.combinations().is_empty());
    }

    #[test]
    fn test_list_valued_axis_is_not_flattened() {
        // A list passed as a single axis value reaches the function intact
        let grid = ParameterGrid::default()
            .axis(["pt"])
            .axis([ParamValue::from(vec![1i64, 2, 3])]);

        let combos = grid.combinations();
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0][1].as_list().map(|l| l.len()), Some(3));
    }
}
