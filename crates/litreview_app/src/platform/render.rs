use litreview_core::{AppViewModel, Message, MessageKind, Status};

/// Form summary for stderr: language, files, and the current status.
pub(crate) fn render_summary(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::with_capacity(view.files.len() + 3);
    lines.push(format!(
        "Topic: {} | Language: {} | API key: {}",
        if view.research_topic.trim().is_empty() {
            "-"
        } else {
            view.research_topic.as_str()
        },
        view.output_language,
        if view.has_credential { "set" } else { "missing" }
    ));
    lines.push(format!("Files: {}", view.file_counter));
    for row in &view.files {
        lines.push(format!("  [{}] {} {}", row.id, row.name, row.size_label));
    }
    if !view.skipped_files.is_empty() {
        lines.push(format!(
            "Skipped (not a PDF): {}",
            view.skipped_files.join(", ")
        ));
    }
    if view.status == Status::Loading {
        lines.push("Generating literature review...".to_string());
    }
    lines
}

pub(crate) fn render_message(message: &Message) -> String {
    match message.kind {
        MessageKind::Error => format!("error: {}", message.text),
        MessageKind::Success => message.text.clone(),
    }
}

/// One paragraph per line of the review, separated by blank lines.
pub(crate) fn render_review(view: &AppViewModel) -> String {
    view.segments.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use litreview_core::{FileCandidate, FileCollection, FileRowView, OutputLanguage, PDF_MEDIA_TYPE};

    fn sample_view() -> AppViewModel {
        let mut collection = FileCollection::new();
        let added = collection
            .add_files(vec![FileCandidate {
                name: "paper.pdf".to_string(),
                size: 1_048_576,
                media_type: PDF_MEDIA_TYPE.to_string(),
                path: "paper.pdf".into(),
            }])
            .unwrap();

        AppViewModel {
            research_topic: "Soil microbiomes".to_string(),
            output_language: OutputLanguage::English,
            has_credential: true,
            files: vec![FileRowView {
                id: added.added[0],
                name: "paper.pdf".to_string(),
                size_label: "(1.00 MB)".to_string(),
            }],
            file_counter: "1/10".to_string(),
            ..AppViewModel::default()
        }
    }

    #[test]
    fn summary_lists_files_with_sizes() {
        let lines = render_summary(&sample_view());
        assert_eq!(
            lines,
            vec![
                "Topic: Soil microbiomes | Language: english | API key: set".to_string(),
                "Files: 1/10".to_string(),
                "  [file-1] paper.pdf (1.00 MB)".to_string(),
            ]
        );
    }

    #[test]
    fn summary_shows_progress_while_loading() {
        let view = AppViewModel {
            status: Status::Loading,
            ..sample_view()
        };
        assert_eq!(
            render_summary(&view).last().map(String::as_str),
            Some("Generating literature review...")
        );
    }

    #[test]
    fn summary_names_skipped_files() {
        let view = AppViewModel {
            skipped_files: vec!["notes.txt".to_string(), "cover.docx".to_string()],
            ..sample_view()
        };
        assert_eq!(
            render_summary(&view).last().map(String::as_str),
            Some("Skipped (not a PDF): notes.txt, cover.docx")
        );
    }

    #[test]
    fn review_keeps_empty_segments() {
        let view = AppViewModel {
            segments: vec!["A".to_string(), String::new(), "B".to_string()],
            ..sample_view()
        };
        assert_eq!(render_review(&view), "A\n\n\n\nB");
    }

    #[test]
    fn errors_are_prefixed() {
        assert_eq!(render_message(&Message::error("nope")), "error: nope");
        assert_eq!(render_message(&Message::success("done")), "done");
    }
}
