//! Version tag parsing, rendering, ordering and bumping.
//!
//! The grammar is semver-shaped but stricter than semver.org in one place:
//! the build metadata segment (`+N`) is a plain integer counter, not a
//! free-form string. That restriction is what allows `bump build` to work.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Result, SemvertagError};

/// Grammar for the version body after the prefix has been stripped:
/// `MAJOR.MINOR.PATCH[-STAGE][+BUILD]`, numeric fields without leading
/// zeroes, stage as dot-separated alphanumeric-hyphen segments.
fn version_regex() -> &'static Regex {
    static VERSION_RE: OnceLock<Regex> = OnceLock::new();
    VERSION_RE.get_or_init(|| {
        Regex::new(
            r"^(?P<major>0|[1-9][0-9]*)\.(?P<minor>0|[1-9][0-9]*)\.(?P<patch>0|[1-9][0-9]*)(?:-(?P<stage>[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+(?P<build>0|[1-9][0-9]*))?$",
        )
        .expect("version grammar regex is valid")
    })
}

/// A semantic version tag with an optional literal prefix.
///
/// Values are immutable once parsed; [VersionTag::bumped] returns a new
/// instance rather than mutating in place, so callers holding the latest
/// version can still inspect it after computing the next one.
///
/// Identity and ordering are defined over `(major, minor, patch, build)`
/// only. Stage is parsed and carried, but two versions that differ only in
/// stage compare as equal; callers filter by stage before sorting.
#[derive(Debug, Clone)]
pub struct VersionTag {
    pub prefix: String,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub stage: Option<String>,
    pub build: u64,
}

/// Which version segment a bump targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BumpField {
    Major,
    Minor,
    Patch,
    Build,
}

impl FromStr for BumpField {
    type Err = SemvertagError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(BumpField::Major),
            "minor" => Ok(BumpField::Minor),
            "patch" => Ok(BumpField::Patch),
            "build" => Ok(BumpField::Build),
            other => Err(SemvertagError::UnsupportedField(other.to_string())),
        }
    }
}

impl fmt::Display for BumpField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpField::Major => "major",
            BumpField::Minor => "minor",
            BumpField::Patch => "patch",
            BumpField::Build => "build",
        };
        write!(f, "{}", name)
    }
}

impl VersionTag {
    /// Parse a raw tag string against a literal prefix.
    ///
    /// The prefix must match byte-for-byte at the start of the tag; it is
    /// stripped before the numeric body is parsed and re-prepended when
    /// rendering. An absent `+BUILD` group parses as build 0.
    ///
    /// # Arguments
    /// * `text` - Raw tag string (e.g., "plum-1.2.1-foo+2")
    /// * `prefix` - Literal prefix (e.g., "plum-", may be empty)
    ///
    /// # Returns
    /// * `Ok(VersionTag)` - Successfully parsed version
    /// * `Err(PrefixMismatch)` - Tag does not start with the prefix
    /// * `Err(InvalidVersionString)` - Body does not match the grammar
    pub fn parse(text: &str, prefix: &str) -> Result<Self> {
        let body = text
            .strip_prefix(prefix)
            .ok_or_else(|| SemvertagError::PrefixMismatch {
                tag: text.to_string(),
                prefix: prefix.to_string(),
            })?;

        let caps = version_regex()
            .captures(body)
            .ok_or_else(|| SemvertagError::InvalidVersionString(text.to_string()))?;

        // The regex only admits decimal integers here, so parse failures
        // can only come from overflow.
        let numeric = |name: &str| -> Result<u64> {
            caps[name]
                .parse::<u64>()
                .map_err(|_| SemvertagError::InvalidVersionString(text.to_string()))
        };

        Ok(VersionTag {
            prefix: prefix.to_string(),
            major: numeric("major")?,
            minor: numeric("minor")?,
            patch: numeric("patch")?,
            stage: caps.name("stage").map(|m| m.as_str().to_string()),
            build: match caps.name("build") {
                Some(_) => numeric("build")?,
                None => 0,
            },
        })
    }

    /// The synthesized `0.0.0` baseline used when no tags match a
    /// prefix/stage pair yet.
    pub fn zero(prefix: &str, stage: Option<&str>) -> Self {
        VersionTag {
            prefix: prefix.to_string(),
            major: 0,
            minor: 0,
            patch: 0,
            stage: stage.map(|s| s.to_string()),
            build: 0,
        }
    }

    /// Return a copy with `field` incremented and all subordinate fields
    /// reset to zero.
    ///
    /// Build is the lowest field and resets nothing. Stage and prefix carry
    /// over unchanged.
    pub fn bumped(&self, field: BumpField) -> Self {
        let mut next = self.clone();
        match field {
            BumpField::Major => {
                next.major += 1;
                next.minor = 0;
                next.patch = 0;
                next.build = 0;
            }
            BumpField::Minor => {
                next.minor += 1;
                next.patch = 0;
                next.build = 0;
            }
            BumpField::Patch => {
                next.patch += 1;
                next.build = 0;
            }
            BumpField::Build => {
                next.build += 1;
            }
        }
        next
    }

    fn sort_key(&self) -> (u64, u64, u64, u64) {
        (self.major, self.minor, self.patch, self.build)
    }
}

// Ordering deliberately ignores stage and prefix: queries filter by both
// before sorting, and the numeric tuple alone decides precedence.
impl PartialEq for VersionTag {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for VersionTag {}

impl Ord for VersionTag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for VersionTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionTag {
    /// Renders `<prefix><major>.<minor>.<patch>[-<stage>][+<build>]`.
    ///
    /// A build of 0 is treated as "no build metadata" and is not rendered,
    /// so the output is the canonical form of the semantic value rather
    /// than a byte-for-byte echo of the input.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}.{}.{}",
            self.prefix, self.major, self.minor, self.patch
        )?;
        if let Some(stage) = &self.stage {
            write!(f, "-{}", stage)?;
        }
        if self.build > 0 {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}
