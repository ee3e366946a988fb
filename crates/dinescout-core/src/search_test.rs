use serde_json::json;

use super::*;

fn record(document: serde_json::Value) -> RestaurantRecord {
    RestaurantRecord::from_document(Uuid::new_v4(), document)
}

#[test]
fn whole_word_matches_case_insensitively() {
    let matcher = TextMatcher::WholeWord("chinese".to_string());
    assert!(matcher.matches("North Indian, Chinese"));
    assert!(matcher.matches("CHINESE"));
    assert!(!matcher.matches("Indochinese"));
    assert!(!matcher.matches("Chinese_Fusion"));
}

#[test]
fn whole_word_follows_word_boundary_rules_for_punctuated_terms() {
    let matcher = TextMatcher::WholeWord("plant-based".to_string());
    assert!(matcher.matches("Vegan, Plant-Based"));
    assert!(!matcher.matches("Plant-Basedish"));

    // A term starting with a non-word character needs a word character before it.
    let matcher = TextMatcher::WholeWord(".net".to_string());
    assert!(matcher.matches("asp.net"));
    assert!(!matcher.matches("a .net"));
}

#[test]
fn whole_word_treats_combining_marks_as_word_characters() {
    let matcher = TextMatcher::WholeWord("cafe".to_string());
    assert!(!matcher.matches("Cafe\u{301} Coffee Day"));
    assert!(matcher.matches("Cafe Coffee Day"));
    assert!(matcher.matches("Irani Cafe"));
}

#[test]
fn to_regex_escapes_the_term() {
    let regex = TextMatcher::WholeWord("c++ fusion".to_string())
        .to_regex()
        .expect("escaped pattern compiles");
    assert!(regex.is_match("Modern C++ Fusion Kitchen"));
    assert!(!regex.is_match("ccc fusion"));
}

#[test]
fn whole_word_finds_a_later_occurrence_after_a_rejected_one() {
    let matcher = TextMatcher::WholeWord("tea".to_string());
    assert!(matcher.matches("Steak, Tea"));
}

#[test]
fn whole_word_treats_regex_metacharacters_literally() {
    let matcher = TextMatcher::WholeWord("a.b".to_string());
    assert!(!matcher.matches("axb"));
    assert!(matcher.matches("x a.b y"));
}

#[test]
fn substring_matches_inside_words() {
    let matcher = TextMatcher::Substring("pizza".to_string());
    assert!(matcher.matches("Pizzeria? no, PizzaHut"));
    assert!(!matcher.matches("Pasta"));
}

#[test]
fn bounding_box_is_closed() {
    let bounds = BoundingBox::around(10.0, 20.0, 1.0);
    assert!(bounds.contains(9.0, 19.0));
    assert!(bounds.contains(11.0, 21.0));
    assert!(bounds.contains(10.5, 20.5));
    assert!(!bounds.contains(11.000_001, 20.0));
    assert!(!bounds.contains(10.0, 18.999_999));
}

#[test]
fn location_filter_includes_record_inside_both_ranges() {
    let filter = SearchIntent::by_location(12.95, 77.55, 0.10)
        .expect("valid intent")
        .into_filter();
    let inside = record(json!({ "location": { "latitude": "12.90", "longitude": "77.60" } }));
    assert!(filter.matches(&inside));
}

#[test]
fn location_filter_excludes_missing_or_non_numeric_coordinates() {
    let filter = SearchIntent::by_location(0.0, 0.0, 180.0)
        .expect("valid intent")
        .into_filter();
    assert!(!filter.matches(&record(json!({ "name": "No location" }))));
    assert!(!filter.matches(&record(
        json!({ "location": { "latitude": "unknown", "longitude": "0" } })
    )));
}

#[test]
fn cuisine_text_filter_checks_cuisines_or_name() {
    let filter = SearchIntent::by_cuisine_text(Some("pizza"))
        .expect("valid intent")
        .into_filter();
    assert!(filter.matches(&record(json!({ "name": "Joe's Pizza", "cuisines": "Italian" }))));
    assert!(filter.matches(&record(json!({ "name": "Joe's", "cuisines": "Pizza, Fast Food" }))));
    assert!(!filter.matches(&record(json!({ "name": "Pizzeria Uno", "cuisines": "Italian" }))));
}

#[test]
fn tag_filter_matches_any_tag_as_substring() {
    let filter = SearchIntent::by_tags(["sushi", "ramen"])
        .expect("valid intent")
        .into_filter();
    assert!(filter.matches(&record(json!({ "name": "Ramenya" }))));
    assert!(filter.matches(&record(json!({ "cuisines": ["Japanese", "Sushi"] }))));
    assert!(!filter.matches(&record(json!({ "name": "Burger Barn", "cuisines": "American" }))));
}

#[test]
fn by_tags_rejects_empty_sets() {
    assert_eq!(
        SearchIntent::by_tags(Vec::<String>::new()),
        Err(QueryError::NoTags)
    );
    assert_eq!(SearchIntent::by_tags(["  "]), Err(QueryError::NoTags));
}

#[test]
fn by_cuisine_text_rejects_missing_and_blank_terms() {
    assert_eq!(SearchIntent::by_cuisine_text(None), Err(QueryError::MissingTerm));
    assert_eq!(SearchIntent::by_cuisine_text(Some("")), Err(QueryError::MissingTerm));
    assert_eq!(SearchIntent::by_cuisine_text(Some("   ")), Err(QueryError::MissingTerm));
    assert_eq!(
        SearchIntent::by_cuisine_text(Some(" thai ")),
        Ok(SearchIntent::ByCuisineText("thai".to_string()))
    );
}

#[test]
fn by_id_rejects_malformed_ids() {
    assert!(matches!(
        SearchIntent::by_id("not-a-uuid"),
        Err(QueryError::MalformedId(ref raw)) if raw == "not-a-uuid"
    ));
    let id = Uuid::new_v4();
    assert_eq!(SearchIntent::by_id(&id.to_string()), Ok(SearchIntent::ById(id)));
}

#[test]
fn by_location_params_validates_inputs() {
    assert_eq!(
        SearchIntent::by_location_params(None, Some("77.5"), None, 5.0),
        Err(QueryError::MissingParameter("latitude"))
    );
    assert!(matches!(
        SearchIntent::by_location_params(Some("abc"), Some("77.5"), None, 5.0),
        Err(QueryError::InvalidNumber { param: "latitude", .. })
    ));
    assert!(matches!(
        SearchIntent::by_location_params(Some("12.9"), Some("77.5"), Some("NaN"), 5.0),
        Err(QueryError::InvalidNumber { param: "radius", .. })
    ));
    assert_eq!(
        SearchIntent::by_location_params(Some("12.9"), Some("77.5"), Some("-1"), 5.0),
        Err(QueryError::NegativeRadius)
    );
}

#[test]
fn by_location_params_uses_default_radius_when_absent() {
    let intent = SearchIntent::by_location_params(Some("12.9"), Some("77.5"), Some(""), 5.0)
        .expect("valid intent");
    assert_eq!(
        intent,
        SearchIntent::ByLocation {
            latitude: 12.9,
            longitude: 77.5,
            radius: 5.0
        }
    );
}
