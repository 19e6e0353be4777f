/// Grouping and search over a mixed collection
use streakpath::*;

fn habit(name: &str, group: &str) -> Habit {
    Habit::new(name, "Activity", "#10b981", Some(group)).unwrap()
}

#[test]
fn test_sections_follow_group_order() {
    let habits = vec![habit("x", "B"), habit("y", "A"), habit("z", "A")];

    let sections = group_sections(&habits, "");
    let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);
    assert_eq!(sections[0].habits.len(), 2);
    assert_eq!(sections[0].habits[0].name, "y");
    assert_eq!(sections[0].habits[1].name, "z");
}

#[test]
fn test_query_against_group_and_name() {
    let habits = vec![habit("Run", "Wellness"), habit("Salad", "Diet")];

    let sections = group_sections(&habits, "wel");
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].habits[0].name, "Run");

    let sections = group_sections(&habits, "SAL");
    assert_eq!(sections[0].title, "Diet");

    assert!(group_sections(&habits, "zzz").is_empty());
}

#[test]
fn test_group_index_ignores_query() {
    let habits = vec![habit("Run", "Wellness"), habit("Salad", "Diet")];
    assert_eq!(group_index(&habits), vec!["Diet", "Wellness"]);
    assert_eq!(group_choices(&habits), vec!["Diet", "General", "Wellness"]);
}
