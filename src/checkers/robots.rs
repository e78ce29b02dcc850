//! robots.txt validation and path testing.
//!
//! Validation walks every line once. `Allow`/`Disallow` (and `Crawl-delay`)
//! belong to the group opened by the most recent `User-agent` line; before the
//! first one they are reported as warnings, not errors. `Sitemap` and `Host`
//! apply to the whole file. Nothing stops the scan: every error on every line
//! is collected.

use crate::error::{ToolError, require};
use crate::results::ToolResult;
use serde::{Deserialize, Serialize};
use texting_robots::Robot;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectiveType {
    UserAgent,
    Disallow,
    Allow,
    Sitemap,
    CrawlDelay,
    Host,
    Unknown,
}

impl DirectiveType {
    fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "user-agent" => DirectiveType::UserAgent,
            "disallow" => DirectiveType::Disallow,
            "allow" => DirectiveType::Allow,
            "sitemap" => DirectiveType::Sitemap,
            "crawl-delay" => DirectiveType::CrawlDelay,
            "host" => DirectiveType::Host,
            _ => DirectiveType::Unknown,
        }
    }

    /// Only meaningful inside a user-agent group
    fn is_group_member(self) -> bool {
        matches!(
            self,
            DirectiveType::Allow | DirectiveType::Disallow | DirectiveType::CrawlDelay
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotsTxtDirective {
    #[serde(rename = "type")]
    pub directive_type: DirectiveType,
    pub value: String,
    /// 1-based
    pub line_number: usize,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RobotsTxtInput {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotsTxtResult {
    pub is_valid: bool,
    pub directives: Vec<RobotsTxtDirective>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Distinct user agents in order of first appearance
    pub user_agents: Vec<String>,
    pub sitemaps: Vec<String>,
    pub group_count: usize,
}

/// Where the validator is in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    NoUserAgentSeen,
    InUserAgentSection,
}

/// Strip an end-of-line comment
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Lines that carry a directive: non-empty once comments are removed
fn directive_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .strip_prefix('\u{FEFF}')
        .unwrap_or(content)
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, strip_comment(line).trim()))
        .filter(|(_, line)| !line.is_empty())
}

/// Validate a robots.txt document
pub fn validate_robots_txt(input: &RobotsTxtInput) -> ToolResult<RobotsTxtResult> {
    ToolResult::run(|| {
        require(&input.content, "robots.txt content")?;
        Ok(validate(&input.content))
    })
}

fn validate(content: &str) -> RobotsTxtResult {
    let mut section = Section::NoUserAgentSeen;
    let mut previous: Option<DirectiveType> = None;
    let mut orphaned_rules = false;
    let mut result = RobotsTxtResult {
        is_valid: true,
        directives: Vec::new(),
        errors: Vec::new(),
        warnings: Vec::new(),
        user_agents: Vec::new(),
        sitemaps: Vec::new(),
        group_count: 0,
    };

    for (line_number, line) in directive_lines(content) {
        let Some((name, value)) = line.split_once(':') else {
            let message = "Missing ':' separator".to_string();
            result.errors.push(format!("Line {}: {}", line_number, message));
            result.directives.push(RobotsTxtDirective {
                directive_type: DirectiveType::Unknown,
                value: line.to_string(),
                line_number,
                is_valid: false,
                error: Some(message),
            });
            previous = Some(DirectiveType::Unknown);
            continue;
        };

        let directive_type = DirectiveType::from_name(name);
        let value = value.trim();

        if directive_type.is_group_member() && section == Section::NoUserAgentSeen {
            orphaned_rules = true;
            result.warnings.push(format!(
                "Line {}: {} appears before any User-agent line and will be ignored",
                line_number,
                name.trim()
            ));
        }

        let error = match directive_type {
            DirectiveType::UserAgent => {
                if value.is_empty() {
                    Some("User-agent value is empty".to_string())
                } else {
                    // Consecutive User-agent lines share one group
                    if previous != Some(DirectiveType::UserAgent) {
                        result.group_count += 1;
                    }
                    if !result.user_agents.iter().any(|ua| ua == value) {
                        result.user_agents.push(value.to_string());
                    }
                    section = Section::InUserAgentSection;
                    None
                }
            }
            DirectiveType::Disallow => check_path(value),
            DirectiveType::Allow => {
                if value.is_empty() {
                    result
                        .warnings
                        .push(format!("Line {}: Empty Allow has no effect", line_number));
                }
                check_path(value)
            }
            DirectiveType::Sitemap => {
                let error = check_sitemap(value);
                if error.is_none() {
                    result.sitemaps.push(value.to_string());
                }
                error
            }
            DirectiveType::CrawlDelay => check_crawl_delay(value),
            DirectiveType::Host => {
                if value.is_empty() {
                    Some("Host value is empty".to_string())
                } else {
                    None
                }
            }
            DirectiveType::Unknown => Some(format!("Unknown directive '{}'", name.trim())),
        };

        if let Some(message) = &error {
            result.errors.push(format!("Line {}: {}", line_number, message));
        }
        result.directives.push(RobotsTxtDirective {
            directive_type,
            value: value.to_string(),
            line_number,
            is_valid: error.is_none(),
            error,
        });
        previous = Some(directive_type);
    }

    // Orphaned rules already carry their own warning
    if result.user_agents.is_empty() && !orphaned_rules {
        result
            .warnings
            .push("No User-agent line found; no rules apply to any crawler".to_string());
    }

    ::log::debug!(
        "Validated robots.txt: {} directives, {} errors, {} warnings",
        result.directives.len(),
        result.errors.len(),
        result.warnings.len()
    );

    result.is_valid = result.errors.is_empty();
    result
}

/// An empty path is valid (`Disallow:` allows everything)
fn check_path(value: &str) -> Option<String> {
    if value.is_empty() || value.starts_with('/') || value.starts_with('*') {
        None
    } else {
        Some(format!("Path '{}' must start with '/' or '*'", value))
    }
}

fn check_sitemap(value: &str) -> Option<String> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => None,
        Ok(url) => Some(format!("Sitemap URL has unsupported scheme '{}'", url.scheme())),
        Err(e) => Some(format!("Sitemap must be an absolute URL: {}", e)),
    }
}

fn check_crawl_delay(value: &str) -> Option<String> {
    match value.parse::<f64>() {
        Ok(delay) if delay.is_finite() && delay >= 0.0 => None,
        _ => Some(format!(
            "Crawl-delay '{}' must be a non-negative number",
            value
        )),
    }
}

/// Outcome of testing one path against a robots.txt
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotsAccess {
    pub allowed: bool,
    /// The user-agent group that applied, if any
    pub matched_group: Option<String>,
    /// The rule that decided, as written (`Disallow: /private`)
    pub matched_rule: Option<String>,
    pub line_number: Option<usize>,
}

#[derive(Debug, Default)]
struct Group {
    agents: Vec<String>,
    rules: Vec<(bool, String, usize)>,
}

/// The name a crawler is matched on: leading letters, digits, `-` and `_`,
/// lower-cased (`Googlebot/2.1` is `googlebot`)
fn product_token(user_agent: &str) -> String {
    let trimmed = user_agent.trim();
    let token: String = trimmed
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if token.is_empty() {
        trimmed.to_lowercase()
    } else {
        token.to_lowercase()
    }
}

fn parse_groups(content: &str) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut previous_was_agent = false;

    for (line_number, line) in directive_lines(content) {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match DirectiveType::from_name(name) {
            DirectiveType::UserAgent => {
                if !previous_was_agent || groups.is_empty() {
                    groups.push(Group::default());
                }
                if let Some(group) = groups.last_mut() {
                    group.agents.push(product_token(value));
                }
                previous_was_agent = true;
                continue;
            }
            DirectiveType::Allow if !value.is_empty() => {
                if let Some(group) = groups.last_mut() {
                    group.rules.push((true, value.to_string(), line_number));
                }
            }
            DirectiveType::Disallow if !value.is_empty() => {
                if let Some(group) = groups.last_mut() {
                    group.rules.push((false, value.to_string(), line_number));
                }
            }
            _ => {}
        }
        previous_was_agent = false;
    }

    groups
}

/// Whether `pattern` (with `*` wildcards and an optional `$` anchor) matches
/// the start of `path`
fn rule_matches(pattern: &str, path: &str) -> bool {
    let (pattern, anchored) = match pattern.strip_suffix('$') {
        Some(p) => (p, true),
        None => (pattern, false),
    };

    let pieces: Vec<&str> = pattern.split('*').collect();
    let mut pos = 0;
    for (idx, piece) in pieces.iter().enumerate() {
        if idx == 0 {
            if !path.starts_with(piece) {
                return false;
            }
            pos = piece.len();
            continue;
        }
        let is_last = idx == pieces.len() - 1;
        if is_last && anchored {
            return path.len() >= pos + piece.len() && path.ends_with(piece);
        }
        match path[pos..].find(piece) {
            Some(found) => pos += found + piece.len(),
            None => return false,
        }
    }

    !anchored || pos == path.len()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotsPathInput {
    pub content: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    pub path: String,
}

fn default_user_agent() -> String {
    "*".to_string()
}

/// [`test_path`] behind the usual input checks
pub fn check_robots_path(input: &RobotsPathInput) -> ToolResult<RobotsAccess> {
    ToolResult::run(|| {
        require(&input.content, "robots.txt content")?;
        require(&input.path, "Path")?;
        test_path(&input.content, &input.user_agent, &input.path)
    })
}

/// Decide whether `user_agent` may fetch `path`.
///
/// The verdict comes from `texting_robots`. Groups naming the crawler's
/// product token are used in place of `*`; within them the longest matching
/// rule decides, with Allow winning ties. The returned rule is the one that
/// explains the verdict.
pub fn test_path(content: &str, user_agent: &str, path: &str) -> Result<RobotsAccess, ToolError> {
    let agent = product_token(user_agent);
    let path = match path.trim() {
        "" => "/".to_string(),
        p if p.starts_with('/') => p.to_string(),
        p => format!("/{}", p),
    };

    let robot = Robot::new(&agent, content.as_bytes())
        .map_err(|e| ToolError::InvalidInput(format!("robots.txt could not be parsed: {}", e)))?;
    let allowed = robot.allowed(&path);

    let groups = parse_groups(content);
    let named: Vec<&Group> = groups
        .iter()
        .filter(|g| agent != "*" && g.agents.iter().any(|a| *a == agent))
        .collect();
    let applicable: Vec<&Group> = if named.is_empty() {
        groups
            .iter()
            .filter(|g| g.agents.iter().any(|a| a == "*"))
            .collect()
    } else {
        named
    };

    let matched_group = match applicable.first() {
        None => None,
        Some(g) if g.agents.contains(&agent) => Some(agent.clone()),
        Some(_) => Some("*".to_string()),
    };

    let best = applicable
        .iter()
        .flat_map(|g| g.rules.iter())
        .filter(|(allow, pattern, _)| *allow == allowed && rule_matches(pattern, &path))
        .max_by(|a, b| a.1.len().cmp(&b.1.len()).then(b.2.cmp(&a.2)));

    ::log::debug!("robots.txt: {} {} for {}", path, if allowed { "allowed" } else { "blocked" }, agent);

    Ok(RobotsAccess {
        allowed,
        matched_group,
        matched_rule: best.map(|(allow, pattern, _)| {
            format!("{}: {}", if *allow { "Allow" } else { "Disallow" }, pattern)
        }),
        line_number: best.map(|(_, _, line_number)| *line_number),
    })
}
