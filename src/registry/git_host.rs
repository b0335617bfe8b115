//! Specifier parsing shared by the git hosting providers.
//!
//! Registries on a git host are written `<host>/<owner>/<repo>`, optionally
//! pinned to a ref with the host's tree marker
//! (`github/acme/lib/tree/v1`, `gitlab/acme/lib/-/tree/v1`).

use crate::error::Result;

use super::provider::{invalid, ParsedSpecifier};

/// Owner, repository and optional ref of a hosted registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    pub owner: String,
    pub repo: String,
    pub git_ref: Option<String>,
}

impl RepoLocation {
    /// The ref to read from; `HEAD` means the default branch.
    pub fn git_ref(&self) -> &str {
        self.git_ref.as_deref().unwrap_or("HEAD")
    }
}

/// Syntax of one git host.
#[derive(Debug, Clone, Copy)]
pub struct HostSyntax {
    /// Short prefix, e.g. `github/`.
    pub prefix: &'static str,
    /// Web URL prefix, e.g. `https://github.com/`.
    pub web_prefix: &'static str,
    /// Path segments introducing a ref, e.g. `["tree"]`.
    pub tree_marker: &'static [&'static str],
}

impl HostSyntax {
    /// Does `input` use this host?
    pub fn matches(&self, input: &str) -> bool {
        input.starts_with(self.prefix) || input.starts_with(self.web_prefix)
    }

    /// The canonical registry URL for `location`.
    pub fn registry_url(&self, location: &RepoLocation) -> String {
        let mut url = format!("{}{}/{}", self.prefix, location.owner, location.repo);
        if let Some(git_ref) = &location.git_ref {
            for marker in self.tree_marker {
                url.push('/');
                url.push_str(marker);
            }
            url.push('/');
            url.push_str(git_ref);
        }
        url
    }

    /// Split `input` into repository location and trailing segments.
    pub fn locate<'i>(&self, input: &'i str) -> Result<(RepoLocation, Vec<&'i str>)> {
        let rest = input
            .strip_prefix(self.prefix)
            .or_else(|| input.strip_prefix(self.web_prefix))
            .ok_or_else(|| invalid(input, format!("expected a {} registry", self.prefix)))?;

        let segments: Vec<&str> = rest.trim_end_matches('/').split('/').collect();
        let (owner, repo) = match segments.as_slice() {
            [owner, repo, ..] if !owner.is_empty() && !repo.is_empty() => (*owner, *repo),
            _ => return Err(invalid(input, "expected <owner>/<repo>")),
        };

        let mut idx = 2;
        let marker_end = idx + self.tree_marker.len();
        let mut git_ref = None;
        if segments.len() > marker_end
            && segments[idx..marker_end]
                .iter()
                .zip(self.tree_marker)
                .all(|(a, b)| a == b)
        {
            git_ref = Some(segments[marker_end].to_string());
            idx = marker_end + 1;
        }

        Ok((
            RepoLocation {
                owner: owner.to_string(),
                repo: repo.trim_end_matches(".git").to_string(),
                git_ref,
            },
            segments[idx..].to_vec(),
        ))
    }

    /// Provider `parse` for this host.
    pub fn parse(&self, input: &str, fully_qualified: bool) -> Result<ParsedSpecifier> {
        let (location, rest) = self.locate(input)?;
        let registry_url = self.registry_url(&location);

        let specifier = match (fully_qualified, rest.as_slice()) {
            (true, [category, name]) if !category.is_empty() && !name.is_empty() => {
                format!("{}/{}", category, name)
            }
            (true, _) => return Err(invalid(input, "expected <category>/<name> after the repository")),
            (false, []) => String::new(),
            (false, _) => return Err(invalid(input, "unexpected path after the repository")),
        };

        Ok(ParsedSpecifier {
            registry_url,
            specifier,
        })
    }
}
