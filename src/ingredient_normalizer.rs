/// Measurement units, quantity adjectives, preparation descriptors and digit
/// characters stripped from ingredient phrases. A token is dropped when any
/// of these terms appears anywhere inside it, so "100g" is removed by the
/// digit terms and short units like "oz" also claim longer words that merely
/// contain them.
const STOPLIST: &[&str] = &[
    "cup", "cups", "tbsp", "tsp", "tablespoon", "tablespoons",
    "teaspoon", "teaspoons", "lb", "lbs", "oz", "ounce", "ounces",
    "pound", "pounds", "gram", "grams", "kg", "kilogram", "kilograms",
    "fresh", "dried", "chopped", "diced", "sliced", "minced",
    "large", "small", "medium", "whole", "half", "quarter",
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "0",
];

/// Turn a comma-separated ingredient string into canonical ingredient names.
///
/// Each phrase is lowercased and tokenized on whitespace; tokens that are
/// purely numeric or that hit the stoplist are dropped, the remainder is
/// rejoined and title-cased. Phrases reduced to a single character or less
/// are discarded entirely. Order and duplicates are preserved, and no input
/// can make this fail - the worst case is an empty output.
pub fn normalize_ingredients(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let mut ingredients = Vec::new();
    for phrase in raw.split(',') {
        let lowered = phrase.trim().to_lowercase();
        let kept: Vec<&str> = lowered
            .split_whitespace()
            .filter(|word| !should_strip(word))
            .collect();
        let cleaned = kept.join(" ");
        if cleaned.chars().count() > 1 {
            ingredients.push(title_case(&cleaned));
        }
    }
    ingredients
}

fn should_strip(word: &str) -> bool {
    word.chars().all(|c| c.is_ascii_digit()) || STOPLIST.iter().any(|term| word.contains(term))
}

/// Uppercase the first letter of each whitespace-separated word. Input is
/// expected to be lowercase already.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
