//! Filter pipeline
//!
//! Narrows the query engine's id set by the categorical selections while
//! keeping the canonical record order.

use sift_core::{FilterSet, IdSet, Record};

/// Records whose id is in `ids` and which pass `filters`, in input order
pub fn apply_filters(records: &[Record], ids: &IdSet, filters: &FilterSet) -> Vec<Record> {
    records
        .iter()
        .filter(|r| ids.contains(&r.id) && filters.matches(r))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sift_core::{NewRecord, Priority, RecordId, Selection, Status};

    fn records() -> Vec<Record> {
        let specs = [
            (5, Priority::High, Status::Open),
            (4, Priority::Low, Status::Closed),
            (3, Priority::High, Status::Closed),
            (2, Priority::Medium, Status::Open),
            (1, Priority::High, Status::Open),
        ];
        specs
            .iter()
            .map(|&(id, p, s)| {
                NewRecord::new(format!("ticket {}", id), "body")
                    .unwrap()
                    .with_priority(p)
                    .with_status(s)
                    .into_record(RecordId::new(id), Utc::now())
            })
            .collect()
    }

    fn id_list(records: &[Record]) -> Vec<u64> {
        records.iter().map(|r| r.id.as_u64()).collect()
    }

    #[test]
    fn test_all_filters_keep_id_set_in_order() {
        let records = records();
        let ids: IdSet = [1, 3, 5].into_iter().map(RecordId::new).collect();
        let out = apply_filters(&records, &ids, &FilterSet::default());
        assert_eq!(id_list(&out), vec![5, 3, 1]);
    }

    #[test]
    fn test_priority_filter() {
        let records = records();
        let ids: IdSet = records.iter().map(|r| r.id).collect();
        let filters = FilterSet::new(Selection::Only(Priority::High), Selection::All);
        assert_eq!(id_list(&apply_filters(&records, &ids, &filters)), vec![5, 3, 1]);
    }

    #[test]
    fn test_priority_and_status_filter() {
        let records = records();
        let ids: IdSet = records.iter().map(|r| r.id).collect();
        let filters = FilterSet::new(Selection::Only(Priority::High), Selection::Only(Status::Open));
        assert_eq!(id_list(&apply_filters(&records, &ids, &filters)), vec![5, 1]);
    }

    #[test]
    fn test_empty_id_set() {
        let records = records();
        let out = apply_filters(&records, &IdSet::default(), &FilterSet::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_ids_not_in_records_are_ignored() {
        let records = records();
        let ids: IdSet = [2, 99].into_iter().map(RecordId::new).collect();
        let out = apply_filters(&records, &ids, &FilterSet::default());
        assert_eq!(id_list(&out), vec![2]);
    }
}
