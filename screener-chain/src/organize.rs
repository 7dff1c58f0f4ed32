//! Strike ordering and at-the-money boundary detection

use std::borrow::Borrow;

use crate::model::{ContractType, OptionContract};

/// Contracts sorted by strike ascending.
///
/// The sort is stable: equal strikes keep their input order.
pub fn organize(contracts: &[OptionContract]) -> Vec<&OptionContract> {
    let mut sorted: Vec<&OptionContract> = contracts.iter().collect();
    sorted.sort_by(|a, b| a.strike.total_cmp(&b.strike));
    sorted
}

/// Index of the first contract that is not in the money while its predecessor is.
///
/// Scans strike-ascending calls; returns `None` when every contract is on the same side of the
/// money (or the slice is empty).
pub fn find_atm_boundary<C>(sorted_calls: &[C]) -> Option<usize>
where
    C: Borrow<OptionContract>,
{
    sorted_calls
        .windows(2)
        .position(|pair| pair[0].borrow().in_the_money && !pair[1].borrow().in_the_money)
        .map(|index| index + 1)
}

/// ATM boundary for one side of the chain.
///
/// Only calls are marked. Puts never receive a boundary.
// TODO: decide whether puts get a mirrored marker (OTM -> ITM scanning strike-descending).
pub fn atm_boundary<C>(side: ContractType, sorted: &[C]) -> Option<usize>
where
    C: Borrow<OptionContract>,
{
    match side {
        ContractType::Call => find_atm_boundary(sorted),
        ContractType::Put => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(name: &str, strike: f64, in_the_money: bool) -> OptionContract {
        OptionContract {
            contract_name: name.to_string(),
            strike,
            in_the_money,
            ..Default::default()
        }
    }

    fn with_itm(itm: &[bool]) -> Vec<OptionContract> {
        itm.iter()
            .enumerate()
            .map(|(index, &itm)| contract(&format!("C{index}"), 100.0 + index as f64, itm))
            .collect()
    }

    #[test]
    fn test_organize_is_stable() {
        let contracts = vec![
            contract("first_50", 50.0, false),
            contract("second_50", 50.0, false),
            contract("only_40", 40.0, true),
        ];

        let sorted = organize(&contracts);

        let strikes: Vec<f64> = sorted.iter().map(|c| c.strike).collect();
        let names: Vec<&str> = sorted.iter().map(|c| c.contract_name.as_str()).collect();
        assert_eq!(strikes, vec![40.0, 50.0, 50.0]);
        assert_eq!(names, vec!["only_40", "first_50", "second_50"]);
    }

    #[test]
    fn test_organize_empty() {
        assert!(organize(&[]).is_empty());
    }

    #[test]
    fn test_find_atm_boundary() {
        struct TestCase {
            itm: Vec<bool>,
            expected: Option<usize>,
        }

        let tests = vec![
            TestCase {
                // TC0: first non-ITM after ITM
                itm: vec![true, true, false, false],
                expected: Some(2),
            },
            TestCase {
                // TC1: all ITM
                itm: vec![true, true, true],
                expected: None,
            },
            TestCase {
                // TC2: all OTM
                itm: vec![false, false, false],
                expected: None,
            },
            TestCase {
                // TC3: empty
                itm: vec![],
                expected: None,
            },
            TestCase {
                // TC4: single contract
                itm: vec![true],
                expected: None,
            },
            TestCase {
                // TC5: only the first transition is marked
                itm: vec![true, false, true, false],
                expected: Some(1),
            },
            TestCase {
                // TC6: OTM to ITM is not a call boundary
                itm: vec![false, false, true, true],
                expected: None,
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let contracts = with_itm(&test.itm);
            let actual = find_atm_boundary(&contracts);
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_atm_boundary_calls_only() {
        let contracts = with_itm(&[true, true, false]);
        let sorted = organize(&contracts);

        assert_eq!(atm_boundary(ContractType::Call, &sorted), Some(2));
        assert_eq!(atm_boundary(ContractType::Put, &sorted), None);
    }
}
