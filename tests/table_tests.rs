use cityplan::data::table::{DataTable, RawSheet, RawValue};

fn headers() -> Vec<String> {
    ["Service", "Building", "Level", "Capacity", "CumCost", "MaxLevel"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn valid_row(service: &str, building: &str, level: f64) -> Vec<RawValue> {
    vec![
        RawValue::Text(service.to_string()),
        RawValue::Text(building.to_string()),
        RawValue::Number(level),
        RawValue::Number(100.0),
        RawValue::Number(500.0),
        RawValue::Number(5.0),
    ]
}

#[test]
fn missing_columns_are_named_in_schema_error() {
    let sheet = RawSheet {
        headers: vec!["Service".to_string(), "Level".to_string()],
        rows: vec![],
    };
    let err = DataTable::build(&sheet).expect_err("schema should be rejected");
    assert_eq!(
        err.missing_columns,
        vec!["Building", "Capacity", "CumCost", "MaxLevel"]
    );
    assert!(err.to_string().contains("Building"));
}

#[test]
fn empty_input_yields_empty_table_not_error() {
    let sheet = RawSheet {
        headers: headers(),
        rows: vec![],
    };
    let table = DataTable::build(&sheet).expect("empty input should build");
    assert!(table.is_empty());
    assert!(table.services().is_empty());
}

#[test]
fn rows_missing_key_fields_are_dropped() {
    let mut no_service = valid_row("", "Plant", 1.0);
    no_service[0] = RawValue::Empty;
    let mut blank_building = valid_row("Water", "  ", 2.0);
    blank_building[1] = RawValue::Text("   ".to_string());
    let mut bad_level = valid_row("Water", "Plant", 0.0);
    bad_level[2] = RawValue::Text("three".to_string());

    let sheet = RawSheet {
        headers: headers(),
        rows: vec![
            valid_row("Water", "Plant", 1.0),
            no_service,
            blank_building,
            bad_level,
            valid_row("Water", "Plant", 2.0),
            valid_row("Power", "Coal Plant", 1.0),
        ],
    };

    let table = DataTable::build(&sheet).expect("schema should be valid");
    assert_eq!(table.len(), 3);
}

#[test]
fn find_matches_exact_composite_key() {
    let sheet = RawSheet {
        headers: headers(),
        rows: vec![
            valid_row("Water", "Plant", 1.0),
            valid_row("Water", "Plant", 3.0),
            valid_row("Water", "Tower", 1.0),
        ],
    };
    let table = DataTable::build(&sheet).expect("schema should be valid");

    let record = table.find("Water", "Plant", 3).expect("record should exist");
    assert_eq!(record.level, 3);
    assert_eq!(record.capacity, 100.0);
}

#[test]
fn sparse_level_is_not_found_even_below_max_level() {
    // Levels 1 and 3 exist with MaxLevel 5; level 2 must not be interpolated.
    let sheet = RawSheet {
        headers: headers(),
        rows: vec![valid_row("Water", "Plant", 1.0), valid_row("Water", "Plant", 3.0)],
    };
    let table = DataTable::build(&sheet).expect("schema should be valid");

    assert!(table.find("Water", "Plant", 2).is_none());
    assert!(table.find("Water", "Plant", 4).is_none());
    assert!(table.find("Water", "Pumping Station", 1).is_none());
}

#[test]
fn duplicate_composite_keys_resolve_to_first_record() {
    let mut first = valid_row("Water", "Plant", 1.0);
    first[3] = RawValue::Number(40.0);
    let mut second = valid_row("Water", "Plant", 1.0);
    second[3] = RawValue::Number(999.0);

    let sheet = RawSheet {
        headers: headers(),
        rows: vec![first, second],
    };
    let table = DataTable::build(&sheet).expect("schema should be valid");

    let record = table.find("Water", "Plant", 1).expect("record should exist");
    assert_eq!(record.capacity, 40.0);
}

#[test]
fn enumeration_helpers_are_sorted_and_deduped() {
    let sheet = RawSheet {
        headers: headers(),
        rows: vec![
            valid_row("Water", "Tower", 1.0),
            valid_row("Power", "Coal Plant", 1.0),
            valid_row("Water", "Plant", 1.0),
            valid_row("Water", "Plant", 2.0),
        ],
    };
    let table = DataTable::build(&sheet).expect("schema should be valid");

    assert_eq!(table.services(), vec!["Power", "Water"]);
    assert_eq!(table.buildings_for("Water"), vec!["Plant", "Tower"]);
    assert_eq!(table.max_level_for("Water", "Plant"), Some(5));
    assert_eq!(table.max_level_for("Water", "Reservoir"), None);
}

#[test]
fn extra_columns_are_ignored() {
    let mut extended = headers();
    extended.push("Notes".to_string());
    let mut row = valid_row("Water", "Plant", 1.0);
    row.push(RawValue::Text("hand-checked".to_string()));

    let sheet = RawSheet {
        headers: extended,
        rows: vec![row],
    };
    let table = DataTable::build(&sheet).expect("schema should be valid");
    assert_eq!(table.len(), 1);
}
