use super::*;

#[test]
fn branch_decodes_camel_case_and_numeric_id() {
    let body = br#"{"id":4,"name":"North","address":"1 Main St","isActive":false,"createdAt":"2024-03-01T10:00:00Z","extra":1}"#;
    let branch: Branch = serde_json::from_slice(body).unwrap();
    assert_eq!(branch.id, "4");
    assert!(!branch.is_active);
    assert_eq!(branch.phone, None);
    assert_eq!(branch.cells(), vec!["North", "1 Main St", "", "Inactive", "2024-03-01"]);
}

#[test]
fn branch_defaults_to_active() {
    let branch: Branch = serde_json::from_slice(br#"{"id":"b1","name":"South"}"#).unwrap();
    assert!(branch.is_active);
}

#[test]
fn tax_rate_accepts_string_numbers() {
    let tax: Tax = serde_json::from_slice(br#"{"id":"t1","name":"VAT","rate":"16.5"}"#).unwrap();
    assert!((tax.rate - 16.5).abs() < f64::EPSILON);
    assert_eq!(tax.cells()[1], "16.5%");
}

#[test]
fn tax_rate_rejects_garbage() {
    assert!(serde_json::from_slice::<Tax>(br#"{"id":"t1","name":"VAT","rate":"lots"}"#).is_err());
}

#[test]
fn table_status_unknown_values_are_tolerated() {
    let table: PhysicalTable =
        serde_json::from_slice(br#"{"id":1,"number":12,"capacity":4,"status":"cleaning","branchId":3}"#).unwrap();
    assert_eq!(table.number, "12");
    assert_eq!(table.status, TableStatus::Unknown);
    assert_eq!(table.branch_id.as_deref(), Some("3"));
}

#[test]
fn table_status_toggle() {
    assert_eq!(TableStatus::Available.toggled(), TableStatus::Occupied);
    assert_eq!(TableStatus::Occupied.toggled(), TableStatus::Available);
    assert_eq!(TableStatus::Reserved.toggled(), TableStatus::Available);
}

#[test]
fn user_account_rejects_unknown_role() {
    let body = br#"{"id":"u1","name":"Ann","email":"a@b.c","role":"owner"}"#;
    assert!(serde_json::from_slice::<UserAccount>(body).is_err());
}

#[test]
fn user_branch_falls_back_to_ids() {
    let row: UserBranch = serde_json::from_slice(br#"{"id":"ub1","userId":7,"branchId":"b2"}"#).unwrap();
    assert_eq!(row.cells(), vec!["7", "b2", ""]);
}

#[test]
fn settings_serialize_camel_case_without_timestamp() {
    let settings = BusinessSettings {
        business_name: "Cafe".to_owned(),
        currency: "MXN".to_owned(),
        tax_included: true,
        receipt_footer: None,
        updated_at: Some("2024-01-01".to_owned()),
    };
    let json = serde_json::to_value(&settings).unwrap();
    assert_eq!(json["businessName"], "Cafe");
    assert_eq!(json["taxIncluded"], true);
    assert!(json.get("updatedAt").is_none());
}

#[test]
fn dashboard_stats_fill_missing_fields() {
    let stats: DashboardStats = serde_json::from_slice(br#"{"totalSales":"1200.50","ordersToday":8}"#).unwrap();
    assert!((stats.total_sales - 1200.5).abs() < f64::EPSILON);
    assert_eq!(stats.orders_today, 8);
    assert_eq!(stats.total_users, 0);
}

#[test]
fn decode_list_accepts_all_envelopes() {
    let bare = br#"[{"id":"p1","name":"Cash"}]"#;
    let data = br#"{"data":[{"id":"p1","name":"Cash"}]}"#;
    let items = br#"{"items":[{"id":"p1","name":"Cash"}],"total":1}"#;
    for body in [&bare[..], &data[..], &items[..]] {
        let rows: Vec<PaymentMethod> = decode_list(body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Cash");
    }
}

#[test]
fn decode_list_rejects_non_list() {
    assert!(decode_list::<PaymentMethod>(br#"{"id":"p1","name":"Cash"}"#).is_err());
}

#[test]
fn decode_one_unwraps_data_envelope() {
    let body = br#"{"data":{"businessName":"Cafe","currency":"USD"}}"#;
    let settings: BusinessSettings = decode_one(body).unwrap();
    assert_eq!(settings.business_name, "Cafe");
}

#[test]
fn decode_one_empty_body_is_null() {
    let (): () = decode_one(b"").unwrap();
    let missing: Option<Category> = decode_one(b"  ").unwrap();
    assert!(missing.is_none());
}

#[test]
fn format_date_keeps_date_part() {
    assert_eq!(format_date(Some("2024-05-06T08:09:10Z")), "2024-05-06");
    assert_eq!(format_date(Some("2024-05-06")), "2024-05-06");
    assert_eq!(format_date(None), "");
}
