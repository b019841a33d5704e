use blog_api::endpoints::EntityId;

/// Next free id for a collection: one past the largest numeric id.
///
/// Ids are trimmed before parsing; blank and non-numeric ids are ignored.
/// Returns `"1"` when nothing numeric is present.
pub fn next_id<'a>(ids: impl IntoIterator<Item = &'a EntityId>) -> EntityId {
    let max = ids
        .into_iter()
        .filter_map(EntityId::as_number)
        .max()
        .unwrap_or(0);

    EntityId::from(max.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<EntityId> {
        raw.iter().map(|s| EntityId::from(*s)).collect()
    }

    #[test]
    fn empty_collection_starts_at_one() {
        assert_eq!(next_id(&ids(&[])), "1");
    }

    #[test]
    fn max_plus_one() {
        assert_eq!(next_id(&ids(&["1", "2", "10", "3"])), "11");
    }

    #[test]
    fn ignores_blank_and_non_numeric_ids() {
        assert_eq!(next_id(&ids(&["", "  ", "abc", "4"])), "5");
        assert_eq!(next_id(&ids(&["abc", "x1"])), "1");
    }

    #[test]
    fn trims_before_parsing() {
        assert_eq!(next_id(&ids(&[" 7 ", "2"])), "8");
    }

    #[test]
    fn order_does_not_matter() {
        assert_eq!(next_id(&ids(&["9", "1", "5"])), next_id(&ids(&["1", "5", "9"])));
    }
}
