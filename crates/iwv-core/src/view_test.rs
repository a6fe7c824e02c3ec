use super::*;

fn product(name: &str, unit: &str, price: &str, indent: bool) -> Product {
    Product {
        product_name: name.to_string(),
        unit_of_measure: unit.to_string(),
        sales_price: price.to_string(),
        indent,
    }
}

fn catalog() -> Vec<Product> {
    vec![
        product("Banana", "/KG", "$3.00", false),
        product("apple", "/KG", "$2.00", true),
        product("Cherry Tomato", "/PKT", "$10.00", false),
        product("Durian", "/PC", "", true),
        product("Green Apple", "/KG", "$2.00", false),
    ]
}

fn names(list: &[&Product]) -> Vec<String> {
    list.iter().map(|p| p.product_name.clone()).collect()
}

// -----------------------------------------------------------------------
// filter
// -----------------------------------------------------------------------

#[test]
fn empty_term_keeps_everything_in_fetch_order() {
    let all = catalog();
    let shown = compute_display_list(&all, "", None);
    assert_eq!(
        names(&shown),
        vec!["Banana", "apple", "Cherry Tomato", "Durian", "Green Apple"]
    );
}

#[test]
fn filter_is_case_insensitive_substring() {
    let all = catalog();
    let shown = compute_display_list(&all, "APPLE", None);
    assert_eq!(names(&shown), vec!["apple", "Green Apple"]);
}

#[test]
fn filter_only_returns_matching_names() {
    let all = catalog();
    for term in ["a", "an", "tom", "zzz", "E"] {
        let lower = term.to_lowercase();
        for p in compute_display_list(&all, term, None) {
            assert!(p.product_name.to_lowercase().contains(&lower));
        }
    }
}

#[test]
fn no_match_yields_empty_list() {
    let all = catalog();
    assert!(compute_display_list(&all, "kiwi", None).is_empty());
}

#[test]
fn source_list_is_not_reordered() {
    let all = catalog();
    let before = all.clone();
    let _ = compute_display_list(&all, "", Some(SortState::ascending(SortColumn::ProductName)));
    assert_eq!(all, before);
}

// -----------------------------------------------------------------------
// sort
// -----------------------------------------------------------------------

#[test]
fn sort_by_name_ascending_ignores_case() {
    let all = catalog();
    let shown = compute_display_list(&all, "", Some(SortState::ascending(SortColumn::ProductName)));
    assert_eq!(
        names(&shown),
        vec!["apple", "Banana", "Cherry Tomato", "Durian", "Green Apple"]
    );
}

#[test]
fn sort_by_indent_puts_false_first_ascending() {
    let all = catalog();
    let shown = compute_display_list(&all, "", Some(SortState::ascending(SortColumn::Indent)));
    assert_eq!(
        names(&shown),
        vec!["Banana", "Cherry Tomato", "Green Apple", "apple", "Durian"]
    );
}

#[test]
fn sort_by_indent_descending_is_stable() {
    let all = catalog();
    let sort = SortState {
        column: SortColumn::Indent,
        ascending: false,
    };
    let shown = compute_display_list(&all, "", Some(sort));
    assert_eq!(
        names(&shown),
        vec!["apple", "Durian", "Banana", "Cherry Tomato", "Green Apple"]
    );
}

#[test]
fn sort_by_price_coerces_unparsable_to_zero() {
    let all = vec![
        product("Ten", "/PKT", "$10.00", false),
        product("Two", "/PKT", "$2.00", false),
        product("Abc", "/PKT", "abc", false),
    ];
    let shown = compute_display_list(&all, "", Some(SortState::ascending(SortColumn::SalesPrice)));
    assert_eq!(names(&shown), vec!["Abc", "Two", "Ten"]);
}

#[test]
fn sort_by_price_is_numeric_not_lexicographic() {
    let all = catalog();
    let shown = compute_display_list(&all, "", Some(SortState::ascending(SortColumn::SalesPrice)));
    assert_eq!(
        names(&shown),
        vec!["Durian", "apple", "Green Apple", "Banana", "Cherry Tomato"]
    );
}

#[test]
fn sort_by_unit() {
    let all = catalog();
    let shown = compute_display_list(&all, "", Some(SortState::ascending(SortColumn::UnitOfMeasure)));
    assert_eq!(
        names(&shown),
        vec!["Banana", "apple", "Green Apple", "Durian", "Cherry Tomato"]
    );
}

#[test]
fn sort_is_idempotent() {
    let all = catalog();
    let sort = Some(SortState::ascending(SortColumn::SalesPrice));
    let once: Vec<Product> = compute_display_list(&all, "", sort)
        .into_iter()
        .cloned()
        .collect();
    let twice = compute_display_list(&once, "", sort);
    assert_eq!(names(&twice), once.iter().map(|p| p.product_name.clone()).collect::<Vec<_>>());
}

#[test]
fn toggling_direction_twice_restores_order() {
    let all = catalog();
    let first = SortState::click(None, SortColumn::ProductName);
    let second = SortState::click(Some(first), SortColumn::ProductName);
    let third = SortState::click(Some(second), SortColumn::ProductName);

    assert!(first.ascending);
    assert!(!second.ascending);
    assert_eq!(first, third);
    assert_eq!(
        names(&compute_display_list(&all, "", Some(first))),
        names(&compute_display_list(&all, "", Some(third)))
    );
}

#[test]
fn clicking_new_column_resets_to_ascending() {
    let desc = SortState {
        column: SortColumn::ProductName,
        ascending: false,
    };
    let next = SortState::click(Some(desc), SortColumn::SalesPrice);
    assert_eq!(next, SortState::ascending(SortColumn::SalesPrice));
    assert_eq!(next.direction_label(), "ascending");
}

#[test]
fn filter_then_sort() {
    let all = catalog();
    let sort = SortState {
        column: SortColumn::SalesPrice,
        ascending: false,
    };
    let shown = compute_display_list(&all, "an", Some(sort));
    assert_eq!(names(&shown), vec!["Banana", "Durian"]);
}

#[test]
fn parse_sort_column_names() {
    assert_eq!("salesPrice".parse::<SortColumn>().unwrap(), SortColumn::SalesPrice);
    assert_eq!("name".parse::<SortColumn>().unwrap(), SortColumn::ProductName);
    assert_eq!("UNIT".parse::<SortColumn>().unwrap(), SortColumn::UnitOfMeasure);
    assert_eq!("indent".parse::<SortColumn>().unwrap(), SortColumn::Indent);
    assert_eq!(
        "colour".parse::<SortColumn>().unwrap_err(),
        CoreError::UnknownSortColumn("colour".to_string())
    );
}
