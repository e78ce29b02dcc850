use crate::error::require;
use crate::parsers::{ExtractorKind, HeadingItem, HtmlExtractor};
use crate::results::{Issue, ToolResult, no_errors};
use crate::utils::preview;
use serde::{Deserialize, Serialize};

/// Headings longer than this are flagged
const MAX_HEADING_CHARS: usize = 70;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeadingInput {
    pub html: String,
    #[serde(default)]
    pub extractor: ExtractorKind,
}

/// A heading and the headings nested under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingNode {
    pub level: u8,
    pub text: String,
    pub children: Vec<HeadingNode>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingAnalysis {
    pub is_valid: bool,
    pub headings: Vec<HeadingItem>,
    pub hierarchy: Vec<HeadingNode>,
    /// Number of headings per level, H1 first
    pub counts: [usize; 6],
    pub total: usize,
    pub issues: Vec<Issue>,
}

/// Rebuild the outline implied by a flat list of headings.
///
/// A heading becomes a child of the nearest preceding heading with a lower
/// level. Skipped levels are kept as they are: H1 followed by H3 nests the H3
/// directly under the H1.
pub fn build_hierarchy(headings: &[HeadingItem]) -> Vec<HeadingNode> {
    let mut roots: Vec<HeadingNode> = Vec::new();
    // Open nodes, outermost first. Closed nodes are attached to their parent
    // (or the roots) as they are popped.
    let mut stack: Vec<HeadingNode> = Vec::new();

    for heading in headings {
        while stack
            .last()
            .is_some_and(|top| top.level >= heading.level)
        {
            close_top(&mut stack, &mut roots);
        }
        stack.push(HeadingNode {
            level: heading.level,
            text: heading.text.clone(),
            children: Vec::new(),
        });
    }
    while !stack.is_empty() {
        close_top(&mut stack, &mut roots);
    }

    roots
}

fn close_top(stack: &mut Vec<HeadingNode>, roots: &mut Vec<HeadingNode>) {
    if let Some(node) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}

/// Depth-first flattening; the inverse of [`build_hierarchy`]
pub fn flatten_hierarchy(nodes: &[HeadingNode]) -> Vec<HeadingItem> {
    let mut flat = Vec::new();
    for node in nodes {
        flat.push(HeadingItem {
            level: node.level,
            text: node.text.clone(),
        });
        flat.extend(flatten_hierarchy(&node.children));
    }
    flat
}

fn heading_issues(headings: &[HeadingItem], counts: &[usize; 6]) -> Vec<Issue> {
    let mut issues = Vec::new();

    match counts[0] {
        0 => issues.push(Issue::error("Page has no H1 heading")),
        1 => {}
        n => issues.push(Issue::warning(format!(
            "Page has {} H1 headings; use a single H1",
            n
        ))),
    }

    let mut previous: Option<u8> = None;
    for heading in headings {
        if let Some(prev) = previous {
            if heading.level > prev + 1 {
                issues.push(Issue::warning(format!(
                    "Skipped heading level H{}→H{} at \"{}\"",
                    prev,
                    heading.level,
                    preview(&heading.text, 40)
                )));
            }
        }
        previous = Some(heading.level);

        if heading.text.is_empty() {
            issues.push(Issue::warning(format!("Empty H{} heading", heading.level)));
        } else if heading.text.chars().count() > MAX_HEADING_CHARS {
            issues.push(Issue::info(format!(
                "H{} is longer than {} characters: \"{}\"",
                heading.level,
                MAX_HEADING_CHARS,
                preview(&heading.text, 40)
            )));
        }
    }

    issues
}

/// Extract headings, rebuild their outline and report structural problems
pub fn analyze_headings(input: &HeadingInput) -> ToolResult<HeadingAnalysis> {
    ToolResult::run(|| {
        require(&input.html, "HTML")?;
        Ok(analyze_with(input.extractor.extractor(), &input.html))
    })
}

fn analyze_with(extractor: &dyn HtmlExtractor, html: &str) -> HeadingAnalysis {
    let headings = extractor.extract_headings(html);

    let mut counts = [0usize; 6];
    for heading in &headings {
        if (1..=6).contains(&heading.level) {
            counts[usize::from(heading.level - 1)] += 1;
        }
    }

    let hierarchy = build_hierarchy(&headings);
    let issues = heading_issues(&headings, &counts);
    ::log::debug!(
        "Analyzed {} headings with {} issues",
        headings.len(),
        issues.len()
    );

    HeadingAnalysis {
        is_valid: no_errors(&issues),
        total: headings.len(),
        headings,
        hierarchy,
        counts,
        issues,
    }
}
