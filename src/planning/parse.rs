/// Flashcard answer split into lead-in text and list entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedCard {
    pub question: String,
    pub intro: String,
    pub items: Vec<String>,
}

/// Split an answer into intro lines and list items.
///
/// `<br>` tags become line breaks. Lines before the first list marker form the intro;
/// from the first marker on, every line is an item.
pub fn parse_flashcard(question: &str, answer: &str) -> ParsedCard {
    let clean = answer.replace("<br>", "\n").replace("<br/>", "\n");

    let mut intro = Vec::new();
    let mut items = Vec::new();
    for line in clean.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if is_list_marker(line) || !items.is_empty() {
            items.push(line.to_string());
        } else {
            intro.push(line);
        }
    }

    ParsedCard {
        question: question.to_string(),
        intro: intro.join("\n"),
        items,
    }
}

/// `1.`, `2)`, `- ` or `• ` at the start of a line.
fn is_list_marker(line: &str) -> bool {
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(c), Some('.' | ')')) if c.is_numeric() => true,
        (Some('-' | '•'), _) => true,
        _ => false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/planning/parse.rs"]
mod tests;
