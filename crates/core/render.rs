use eyre::Context;
use isbn_lookup::{DisplayBookRecord, LookupViewState};

/// Writes view states to stdout, either as text or as one JSON document per line.
pub struct Renderer {
    json: bool,
    quiet: bool,
}

impl Renderer {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }

    #[must_use]
    pub const fn json(&self) -> bool {
        self.json
    }

    pub fn render(&self, identifier: &str, state: &LookupViewState) -> eyre::Result<()> {
        if self.json {
            let mut value = serde_json::to_value(state)
                .wrap_err_with(|| format!("Cannot serialize the state of '{identifier}'"))?;
            if let Some(object) = value.as_object_mut() {
                object.insert("isbn".to_owned(), identifier.into());
            }
            self.line(&value.to_string());
        } else {
            self.line(&view_text(identifier, state));
        }
        Ok(())
    }

    pub fn line(&self, text: &str) {
        if !self.quiet {
            println!("{text}");
        }
    }
}

#[must_use]
pub fn view_text(identifier: &str, state: &LookupViewState) -> String {
    match state {
        LookupViewState::Pending => format!("Looking up ISBN '{identifier}'.."),
        LookupViewState::Failed { message } => {
            format!("{message}\nNo record shown for '{identifier}', try another ISBN.")
        }
        LookupViewState::Succeeded { record } => record_text(record),
    }
}

fn record_text(record: &DisplayBookRecord) -> String {
    let mut lines = vec![record.title.clone()];
    if let Some(subtitle) = &record.subtitle {
        lines.push(subtitle.clone());
    }
    lines.push(String::new());

    let mut rows = vec![
        ("Authors", record.authors.clone()),
        ("Publisher", record.publisher.clone()),
        ("Published", record.published_date.clone()),
        ("Pages", record.page_count.clone()),
    ];
    if let Some(rating) = record.rating {
        rows.push(("Rating", rating.to_string()));
    }
    for (label, value) in [
        ("Categories", &record.categories),
        ("Language", &record.language),
        ("Source", &record.source),
    ] {
        if let Some(value) = value {
            rows.push((label, value.clone()));
        }
    }
    rows.push(("Cover", record.thumbnail.clone()));

    lines.extend(
        rows.into_iter()
            .map(|(label, value)| format!("{:<12}{value}", format!("{label}:"))),
    );

    if let Some(description) = &record.description {
        lines.push(String::new());
        lines.push("Description".to_owned());
        lines.push(description.clone());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::view_text;
    use isbn_lookup::{normalize::normalize, payload::RawBookPayload, LookupViewState};

    fn succeeded(json: &str) -> LookupViewState {
        let payload: RawBookPayload = serde_json::from_str(json).unwrap();
        LookupViewState::Succeeded {
            record: normalize(&payload),
        }
    }

    #[test]
    fn pending_names_the_identifier() {
        assert_eq!(
            "Looking up ISBN '0735619670'..",
            view_text("0735619670", &LookupViewState::Pending)
        );
    }

    #[test]
    fn failure_shows_message_and_way_out() {
        let state = LookupViewState::Failed {
            message: "HTTP error! Status: 404".to_owned(),
        };
        let text = view_text("0000000000", &state);

        assert!(text.starts_with("HTTP error! Status: 404\n"));
        assert!(text.contains("try another ISBN"));
    }

    #[test]
    fn title_only_record_shows_placeholders_and_hides_optionals() {
        let text = view_text("1", &succeeded(r#"{ "title": "Dune" }"#));

        assert_eq!(
            "Dune\n\
             \n\
             Authors:    Unknown\n\
             Publisher:  Unknown\n\
             Published:  Unknown\n\
             Pages:      N/A\n\
             Cover:      /placeholder-cover.png",
            text
        );
    }

    #[test]
    fn full_record_shows_every_field() {
        let text = view_text(
            "1",
            &succeeded(
                r#"{
                    "title": "Code Complete",
                    "subtitle": "A Practical Handbook",
                    "authors": ["Steve McConnell"],
                    "average_rating": 4.5,
                    "ratings_count": 128,
                    "language": "en",
                    "description": "Classic."
                }"#,
            ),
        );

        assert!(text.starts_with("Code Complete\nA Practical Handbook\n"));
        assert!(text.contains("Rating:     4.5 (128 ratings)"));
        assert!(text.contains("Language:   en"));
        assert!(text.ends_with("\nDescription\nClassic."));
        assert!(!text.contains("Categories:"));
    }
}
