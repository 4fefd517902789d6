use chrono::NaiveDate;
use rovertime::errors::AppError;
use rovertime::models::{
    AuditStatus, DutyStatus, EntryStatus, OvertimeEntry, ReportFilter, Shift, UncoveredDuty,
};
use rovertime::store::{AuditUpdate, MemoryStore, RecordStore, SqliteStore};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn entry(emp: &str, date: &str, hours: f64, status: EntryStatus) -> OvertimeEntry {
    OvertimeEntry::new(
        emp,
        "Someone",
        "Operations",
        d(date),
        hours,
        "Regular",
        "",
        status,
        "",
    )
}

fn stores() -> Vec<(&'static str, Box<dyn RecordStore>)> {
    vec![
        ("sqlite", Box::new(SqliteStore::in_memory().expect("sqlite"))),
        ("memory", Box::new(MemoryStore::default())),
    ]
}

#[test]
fn test_insert_then_select_returns_entry() {
    for (kind, mut store) in stores() {
        let e = entry("E1", "2024-01-10", 5.0, EntryStatus::Pending);
        store.insert_overtime(&e).expect("insert");

        let rows = store.select_overtime().expect("select");
        assert_eq!(rows.len(), 1, "{kind}");
        assert_eq!(rows[0], e, "{kind}");
        assert_eq!(store.count_overtime().unwrap(), 1, "{kind}");
    }
}

#[test]
fn test_select_is_ordered_by_date() {
    for (kind, mut store) in stores() {
        store
            .insert_overtime(&entry("E2", "2024-03-01", 1.0, EntryStatus::Approved))
            .unwrap();
        store
            .insert_overtime(&entry("E1", "2024-01-01", 2.0, EntryStatus::Pending))
            .unwrap();

        let dates: Vec<String> = store
            .select_overtime()
            .unwrap()
            .iter()
            .map(|e| e.date_str())
            .collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-03-01"], "{kind}");
    }
}

#[test]
fn test_duplicate_id_is_rejected() {
    for (kind, mut store) in stores() {
        let e = entry("E1", "2024-01-10", 5.0, EntryStatus::Pending);
        store.insert_overtime(&e).unwrap();

        let err = store.insert_overtime(&e).unwrap_err();
        assert!(matches!(err, AppError::DuplicateId(ref id) if *id == e.id), "{kind}");
        assert_eq!(store.count_overtime().unwrap(), 1, "{kind}");
    }
}

#[test]
fn test_bulk_append_is_all_or_nothing() {
    for (kind, mut store) in stores() {
        let existing = entry("E1", "2024-01-10", 5.0, EntryStatus::Pending);
        store.insert_overtime(&existing).unwrap();

        let batch = vec![
            entry("E2", "2024-01-11", 1.0, EntryStatus::Pending),
            existing.clone(),
            entry("E3", "2024-01-12", 2.0, EntryStatus::Pending),
        ];
        assert!(store.bulk_append_overtime(&batch).is_err(), "{kind}");
        assert_eq!(store.count_overtime().unwrap(), 1, "{kind}");

        let ok = vec![
            entry("E2", "2024-01-11", 1.0, EntryStatus::Pending),
            entry("E3", "2024-01-12", 2.0, EntryStatus::Pending),
        ];
        assert_eq!(store.bulk_append_overtime(&ok).unwrap(), 2, "{kind}");
        assert_eq!(store.count_overtime().unwrap(), 3, "{kind}");
    }
}

#[test]
fn test_update_audit_changes_only_audit_fields() {
    for (kind, mut store) in stores() {
        let mut e = entry("E1", "2024-01-10", 5.0, EntryStatus::Approved);
        e.reviewed_by = "Initial".to_string();
        store.insert_overtime(&e).unwrap();

        let found = store
            .update_audit(
                &e.id,
                &AuditUpdate {
                    audit_status: AuditStatus::Discrepancy,
                    reviewed_by: None,
                    discrepancy_comments: Some("hours do not match roster".to_string()),
                },
            )
            .unwrap();
        assert!(found, "{kind}");

        let after = store.find_overtime(&e.id).unwrap().expect("still there");
        assert_eq!(after.audit_status, AuditStatus::Discrepancy, "{kind}");
        assert_eq!(after.reviewed_by, "Initial", "{kind}");
        assert_eq!(after.discrepancy_comments, "hours do not match roster", "{kind}");
        assert_eq!(after.hours, 5.0, "{kind}");
        assert_eq!(after.status, EntryStatus::Approved, "{kind}");

        let missing = store
            .update_audit(
                "no-such-id",
                &AuditUpdate {
                    audit_status: AuditStatus::Verified,
                    reviewed_by: None,
                    discrepancy_comments: None,
                },
            )
            .unwrap();
        assert!(!missing, "{kind}");
    }
}

#[test]
fn test_duties_round_trip_and_filter() {
    for (kind, mut store) in stores() {
        let night = UncoveredDuty::new(
            d("2024-02-03"),
            "HR",
            Shift::Night,
            8.0,
            "sick leave",
            DutyStatus::Open,
        );
        let morning = UncoveredDuty::new(
            d("2024-02-10"),
            "Finance",
            Shift::Morning,
            4.0,
            "",
            DutyStatus::Covered,
        );
        store.insert_duty(&night).unwrap();
        store.insert_duty(&morning).unwrap();

        assert_eq!(store.select_duties().unwrap(), vec![night.clone(), morning.clone()], "{kind}");

        let filter = ReportFilter::default().with_category(Some("night".to_string()));
        assert_eq!(store.select_duties_filtered(&filter).unwrap(), vec![night], "{kind}");
        assert_eq!(store.count_duties().unwrap(), 2, "{kind}");
    }
}

#[test]
fn test_filter_bounds_are_inclusive() {
    for (kind, mut store) in stores() {
        for date in ["2023-12-31", "2024-01-01", "2024-01-15", "2024-01-16"] {
            store
                .insert_overtime(&entry("E1", date, 1.0, EntryStatus::Pending))
                .unwrap();
        }

        let filter = ReportFilter::between(d("2024-01-01"), d("2024-01-15"));
        let dates: Vec<String> = store
            .select_overtime_filtered(&filter)
            .unwrap()
            .iter()
            .map(|e| e.date_str())
            .collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-15"], "{kind}");
    }
}

#[test]
fn test_log_is_kept_by_both_stores() {
    for (kind, mut store) in stores() {
        store.log_operation("add", "x", "one").unwrap();
        store.log_operation("audit", "x", "two").unwrap();

        let ops: Vec<String> = store
            .load_log()
            .unwrap()
            .into_iter()
            .filter(|r| r.target == "x")
            .map(|r| r.operation)
            .collect();
        assert_eq!(ops, vec!["add", "audit"], "{kind}");
    }
}
