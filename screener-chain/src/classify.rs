//! Per-row presentation flags

use std::borrow::Borrow;

use crate::model::{ContractType, OptionContract};
use crate::organize::atm_boundary;

/// Display-only flags for one chain row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RowFlags {
    /// Sourced `in_the_money`, passed through
    pub is_itm: bool,
    /// Sourced `unusual_volume`, passed through
    pub is_unusual: bool,
    /// First out-of-the-money call after the in-the-money run
    pub is_atm_row: bool,
}

impl RowFlags {
    pub fn of(contract: &OptionContract, is_atm_row: bool) -> Self {
        Self {
            is_itm: contract.in_the_money,
            is_unusual: contract.unusual_volume,
            is_atm_row,
        }
    }
}

/// Flags for every row of a strike-sorted side, index-aligned with `sorted`.
pub fn classify_rows<C>(side: ContractType, sorted: &[C]) -> Vec<RowFlags>
where
    C: Borrow<OptionContract>,
{
    let atm_index = atm_boundary(side, sorted);

    sorted
        .iter()
        .enumerate()
        .map(|(index, contract)| RowFlags::of(contract.borrow(), atm_index == Some(index)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(strike: f64, in_the_money: bool, unusual_volume: bool) -> OptionContract {
        OptionContract {
            strike,
            in_the_money,
            unusual_volume,
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_rows_calls() {
        let sorted = vec![
            contract(90.0, true, false),
            contract(100.0, true, true),
            contract(110.0, false, false),
            contract(120.0, false, true),
        ];

        let flags = classify_rows(ContractType::Call, &sorted);

        assert_eq!(
            flags,
            vec![
                RowFlags { is_itm: true, is_unusual: false, is_atm_row: false },
                RowFlags { is_itm: true, is_unusual: true, is_atm_row: false },
                RowFlags { is_itm: false, is_unusual: false, is_atm_row: true },
                RowFlags { is_itm: false, is_unusual: true, is_atm_row: false },
            ]
        );
    }

    #[test]
    fn test_classify_rows_puts_never_mark_atm() {
        let sorted = vec![
            contract(90.0, true, false),
            contract(100.0, false, false),
            contract(110.0, false, false),
        ];

        let flags = classify_rows(ContractType::Put, &sorted);

        assert_eq!(flags.len(), 3);
        assert!(flags.iter().all(|flag| !flag.is_atm_row));
        assert!(flags[0].is_itm);
    }

    #[test]
    fn test_flags_are_passthrough() {
        // ITM flag is read as sourced even when the strike looks inconsistent
        let odd = contract(1_000_000.0, true, true);
        let flags = RowFlags::of(&odd, false);
        assert!(flags.is_itm);
        assert!(flags.is_unusual);
    }
}
