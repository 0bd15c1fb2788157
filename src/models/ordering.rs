//! Display ordering: incomplete items first, completed items last.

/// Stable partition of `items` into incomplete-then-complete order.
///
/// Each group keeps its original relative order. The input is only borrowed,
/// so stored order is never affected.
pub fn order_for_display<T, F>(items: &[T], is_complete: F) -> Vec<&T>
where
    F: Fn(&T) -> bool,
{
    let (complete, mut ordered): (Vec<&T>, Vec<&T>) =
        items.iter().partition(|&item| is_complete(item));
    ordered.extend(complete);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_incomplete_items_first_and_keeps_relative_order() {
        let items = [("A", true), ("B", false), ("C", true), ("D", false)];
        let ordered: Vec<&str> = order_for_display(&items, |(_, done)| *done)
            .into_iter()
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(ordered, vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let items: [bool; 0] = [];
        assert!(order_for_display(&items, |done| *done).is_empty());
    }
}
