//! Named-route URL reversal.
//!
//! Every hyperlink the rendered pages emit is reversed from a [`Route`]
//! value; templates never concatenate URL strings themselves. The URL
//! shapes follow the original site layout:
//!
//! | Route             | Path                                        |
//! |-------------------|---------------------------------------------|
//! | Home              | `/`                                         |
//! | Project           | `/projects/<project>/`                      |
//! | Subproject        | `/projects/<project>/<subproject>/`         |
//! | GitStatus         | `/js/git/<project>/`                        |
//! | Activity          | `/activity/<project>/`                      |
//! | Glossaries        | `/dictionaries/<project>/`                  |
//! | Glossary          | `/dictionaries/<project>/<lang>/`           |
//! | Widgets           | `/widgets/<project>/`                       |
//! | ExportStats       | `/exports/stats/<project>/<subproject>/`    |
//! | Checks            | `/checks/`                                  |

use std::fmt;

use crate::types::{LanguageCode, ProjectSlug, SubprojectSlug};

/// A named route, parameterized by the slugs it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    Home,
    Project { project: &'a ProjectSlug },
    Subproject { project: &'a ProjectSlug, subproject: &'a SubprojectSlug },
    GitStatus { project: &'a ProjectSlug },
    Activity { project: &'a ProjectSlug },
    Glossaries { project: &'a ProjectSlug },
    Glossary { project: &'a ProjectSlug, lang: &'a LanguageCode },
    Widgets { project: &'a ProjectSlug },
    ExportStats { project: &'a ProjectSlug, subproject: &'a SubprojectSlug },
    Checks,
}

impl Route<'_> {
    /// Reverse this route into an absolute path.
    pub fn reverse(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Project { project } => {
                format!("/projects/{}/", encode_segment(&project.0))
            }
            Route::Subproject { project, subproject } => format!(
                "/projects/{}/{}/",
                encode_segment(&project.0),
                encode_segment(&subproject.0)
            ),
            Route::GitStatus { project } => {
                format!("/js/git/{}/", encode_segment(&project.0))
            }
            Route::Activity { project } => {
                format!("/activity/{}/", encode_segment(&project.0))
            }
            Route::Glossaries { project } => {
                format!("/dictionaries/{}/", encode_segment(&project.0))
            }
            Route::Glossary { project, lang } => format!(
                "/dictionaries/{}/{}/",
                encode_segment(&project.0),
                encode_segment(&lang.0)
            ),
            Route::Widgets { project } => {
                format!("/widgets/{}/", encode_segment(&project.0))
            }
            Route::ExportStats { project, subproject } => format!(
                "/exports/stats/{}/{}/",
                encode_segment(&project.0),
                encode_segment(&subproject.0)
            ),
            Route::Checks => "/checks/".to_string(),
        }
    }
}

impl fmt::Display for Route<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reverse())
    }
}

/// Percent-encode one path segment.
///
/// RFC 3986 unreserved characters pass through verbatim; everything else
/// (including `/`) is encoded, so a slug can never escape its segment.
pub fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            other => {
                out.push('%');
                out.push_str(&format!("{other:02X}"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug(s: &str) -> ProjectSlug {
        ProjectSlug::from(s)
    }

    #[test]
    fn project_route() {
        let p = slug("weblate");
        assert_eq!(Route::Project { project: &p }.reverse(), "/projects/weblate/");
    }

    #[test]
    fn subproject_route() {
        let p = slug("weblate");
        let s = SubprojectSlug::from("master");
        assert_eq!(
            Route::Subproject { project: &p, subproject: &s }.reverse(),
            "/projects/weblate/master/"
        );
    }

    #[test]
    fn glossary_routes() {
        let p = slug("weblate");
        let cs = LanguageCode::from("cs");
        assert_eq!(Route::Glossaries { project: &p }.reverse(), "/dictionaries/weblate/");
        assert_eq!(
            Route::Glossary { project: &p, lang: &cs }.reverse(),
            "/dictionaries/weblate/cs/"
        );
    }

    #[test]
    fn maintenance_and_export_routes() {
        let p = slug("weblate");
        let s = SubprojectSlug::from("master");
        assert_eq!(Route::GitStatus { project: &p }.reverse(), "/js/git/weblate/");
        assert_eq!(Route::Widgets { project: &p }.reverse(), "/widgets/weblate/");
        assert_eq!(
            Route::ExportStats { project: &p, subproject: &s }.reverse(),
            "/exports/stats/weblate/master/"
        );
        assert_eq!(Route::Checks.reverse(), "/checks/");
    }

    #[test]
    fn segments_are_percent_encoded() {
        let p = slug("we b/late");
        let url = Route::Project { project: &p }.reverse();
        assert_eq!(url, "/projects/we%20b%2Flate/");
    }

    #[test]
    fn display_matches_reverse() {
        let p = slug("weblate");
        let route = Route::Activity { project: &p };
        assert_eq!(route.to_string(), route.reverse());
        assert_eq!(route.reverse(), "/activity/weblate/");
    }
}
