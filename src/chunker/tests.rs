use super::*;
use chrono::{DateTime, Local, TimeZone};

fn fixed_time() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap()
}

fn config_with(max_chunk_size: usize, separators: &[&str]) -> SplitConfig {
    SplitConfig {
        max_chunk_size,
        overlap: 0,
        separators: separators.iter().map(|s| s.to_string()).collect(),
        keep_separator: true,
    }
}

#[test]
fn test_markdown_sections_become_chunks() {
    let text = "# Doc\nIntro\n## A\nBody A\n## B\nBody B";
    let chunks = split(text, &SplitConfig::default()).unwrap();

    assert_eq!(chunks, vec!["# Doc\nIntro\n", "## A\nBody A\n", "## B\nBody B"]);

    let assembled = assemble(chunks, "source_id", fixed_time());
    assert_eq!(assembled.len(), 3);
    assert_eq!(assembled[0].title, "Doc");
    assert_eq!(assembled[1].title, "A");
    assert_eq!(assembled[2].title, "B");
    assert_eq!(assembled[0].id, "source_id_001");
    assert_eq!(assembled[1].id, "source_id_002");
    assert_eq!(assembled[2].id, "source_id_003");
}

#[test]
fn test_empty_text_yields_no_chunks() {
    let chunks = split("", &SplitConfig::default()).unwrap();
    assert!(chunks.is_empty());
}

#[test]
fn test_no_separator_single_chunk() {
    let text = "Just a short paragraph with no headings at all.";
    let chunks = split(text, &SplitConfig::default()).unwrap();

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0], text);
}

#[test]
fn test_concatenation_reproduces_input() {
    let text = "# Title\nlead-in paragraph\n## One\nfirst body\n## Two\nsecond body\n## Three\ntrailing text";
    let chunks = split(text, &SplitConfig::default()).unwrap();

    assert!(chunks.len() > 1);
    assert_eq!(chunks.concat(), text);
}

#[test]
fn test_split_is_deterministic() {
    let text = "## A\nalpha\n## B\nbeta\n## C\ngamma";
    let config = SplitConfig::default();

    let first = split(text, &config).unwrap();
    let second = split(text, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_oversized_section_is_subdivided() {
    // One section is far over the bound and has to be broken up internally.
    let long_body = "word ".repeat(200);
    let text = format!("## Small\nshort body\n## Large\n{long_body}");
    let config = config_with(120, &["##"]);

    let chunks = split(&text, &config).unwrap();

    assert!(chunks.len() > 2);
    assert_eq!(chunks.concat(), text);
    for chunk in &chunks {
        assert!(
            chunk.chars().count() <= 120,
            "chunk exceeds bound: {} chars",
            chunk.chars().count()
        );
    }
}

#[test]
fn test_unbroken_run_is_hard_cut() {
    // A single run longer than the bound has no separator or whitespace to
    // split at; the character-count cut still bounds it.
    let run = "x".repeat(50);
    let config = config_with(20, &["##"]);

    let chunks = split(&run, &config).unwrap();
    assert_eq!(chunks.concat(), run);
    assert!(chunks.iter().all(|c| c.chars().count() <= 20));
}

#[test]
fn test_lower_priority_separator_used_in_recursion() {
    let paragraphs = vec!["paragraph one", "paragraph two", "paragraph three"];
    let body = paragraphs.join("\n\n");
    let text = format!("## Only Section\n{body}");
    let config = config_with(30, &["##", "\n\n"]);

    let chunks = split(&text, &config).unwrap();

    assert!(chunks.len() > 1);
    assert_eq!(chunks.concat(), text);
}

#[test]
fn test_overlap_duplicates_previous_tail() {
    let text = "## A\n0123456789\n## B\nabcdefghij";
    let mut config = SplitConfig::default();
    config.overlap = 4;

    let chunks = split(text, &config).unwrap();
    assert_eq!(chunks.len(), 2);

    let tail: String = chunks[0].chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    assert!(chunks[1].starts_with(&tail));

    // Size accounting includes the duplicated prefix.
    let assembled = assemble(chunks.clone(), "doc.md", fixed_time());
    assert_eq!(assembled[1].size, chunks[1].chars().count());
}

#[test]
fn test_first_chunk_gets_no_overlap_prefix() {
    let text = "intro text\n## A\nbody";
    let mut config = SplitConfig::default();
    config.overlap = 5;

    let chunks = split(text, &config).unwrap();
    assert_eq!(chunks[0], "intro text\n");
}

#[test]
fn test_zero_chunk_size_is_rejected() {
    let config = config_with(0, &["##"]);
    assert!(matches!(split("text", &config), Err(SplitError::ZeroChunkSize)));
}

#[test]
fn test_empty_separator_list_is_rejected() {
    let config = config_with(1500, &[]);
    assert!(matches!(split("text", &config), Err(SplitError::NoSeparators)));
}

#[test]
fn test_assembled_ids_are_unique_and_ordered() {
    let text = (0..25).map(|i| format!("## H{i}\nbody {i}\n")).collect::<String>();
    let chunks = split(&text, &SplitConfig::default()).unwrap();
    let assembled = assemble(chunks, "manual.md", fixed_time());

    assert_eq!(assembled.len(), 25);
    for (i, chunk) in assembled.iter().enumerate() {
        assert_eq!(chunk.index, i);
        assert_eq!(chunk.id, format!("manual.md_{:03}", i + 1));
    }

    let mut ids: Vec<&str> = assembled.iter().map(|c| c.id.as_str()).collect();
    ids.dedup();
    assert_eq!(ids.len(), 25);
}

#[test]
fn test_separator_only_text_is_not_dropped() {
    let config = SplitConfig {
        keep_separator: false,
        ..SplitConfig::default()
    };

    let chunks = split("####", &config).unwrap();
    assert_eq!(chunks, vec!["####"]);
}
