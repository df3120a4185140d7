//! Display rules derived from the controller state.

use alloy::primitives::U256;

use crate::controller::state::ContractHandle;

pub const NO_ITEMS: &str = "No items to display (num is 0)";
pub const FETCH_PROMPT: &str = "Press [g] to get the sliced array";

/// What the sliced-array area shows.
#[derive(Debug, PartialEq, Eq)]
pub enum SliceView<'a> {
    Items(&'a [String]),
    NoItems,
    Prompt,
}

pub fn slice_view(handle: &ContractHandle) -> SliceView<'_> {
    if !handle.sliced_array.is_empty() {
        SliceView::Items(&handle.sliced_array)
    } else if handle.num.is_zero() {
        SliceView::NoItems
    } else {
        SliceView::Prompt
    }
}

pub fn num_line(num: U256) -> String {
    format!("Current Num: {num}")
}

pub fn array_length_line(length: U256) -> String {
    format!("Array Length: {length}")
}

pub fn slice_title(num: U256) -> String {
    format!("Sliced Array (First {num} items)")
}

/// Warning shown when num asks for more items than the array holds.
///
/// Only reachable when the contract lets num exceed its array or when the
/// two values were read at different times.
pub fn length_warning(num: U256, array_length: U256) -> Option<String> {
    if num > array_length && !array_length.is_zero() {
        Some(format!(
            "Warning: The highest number of items that can be displayed is {array_length}"
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    fn handle(num: u64, length: u64, items: &[&str]) -> ContractHandle {
        let mut handle = ContractHandle::new(Address::ZERO, 1);
        handle.num = U256::from(num);
        handle.array_length = U256::from(length);
        handle.sliced_array = items.iter().map(|s| s.to_string()).collect();
        handle
    }

    #[test]
    fn test_lines() {
        assert_eq!(num_line(U256::from(3)), "Current Num: 3");
        assert_eq!(array_length_line(U256::from(5)), "Array Length: 5");
        assert_eq!(slice_title(U256::from(2)), "Sliced Array (First 2 items)");
    }

    #[test]
    fn test_no_warning_within_bounds() {
        assert!(length_warning(U256::from(3), U256::from(5)).is_none());
        assert!(length_warning(U256::from(5), U256::from(5)).is_none());
    }

    #[test]
    fn test_warning_when_num_exceeds_length() {
        let warning = length_warning(U256::from(7), U256::from(5)).unwrap();
        assert_eq!(
            warning,
            "Warning: The highest number of items that can be displayed is 5"
        );
    }

    #[test]
    fn test_no_warning_before_length_is_known() {
        assert!(length_warning(U256::from(7), U256::ZERO).is_none());
    }

    #[test]
    fn test_slice_items_take_priority() {
        let h = handle(0, 5, &["a", "b"]);
        assert_eq!(slice_view(&h), SliceView::Items(&h.sliced_array));
    }

    #[test]
    fn test_slice_empty_with_zero_num() {
        assert_eq!(slice_view(&handle(0, 5, &[])), SliceView::NoItems);
    }

    #[test]
    fn test_slice_prompt_with_nonzero_num() {
        assert_eq!(slice_view(&handle(2, 5, &[])), SliceView::Prompt);
    }
}
