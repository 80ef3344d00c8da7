//! Format versions and their ordering.

use std::cmp::Ordering;
use std::fmt;

/// Release maturity of a version, ordered from least to most mature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BuildType {
    Dev = 0,
    Alpha = 1,
    Beta = 2,
    Rc = 3,
    Release = 4,
}

impl BuildType {
    /// Converts a wire byte to a build type.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(BuildType::Dev),
            1 => Some(BuildType::Alpha),
            2 => Some(BuildType::Beta),
            3 => Some(BuildType::Rc),
            4 => Some(BuildType::Release),
            _ => None,
        }
    }

    /// Returns the wire byte for this build type.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    fn suffix(self) -> &'static str {
        match self {
            BuildType::Dev => "-dev",
            BuildType::Alpha => "-alpha",
            BuildType::Beta => "-beta",
            BuildType::Rc => "-rc",
            BuildType::Release => "",
        }
    }
}

/// A JDX format version.
///
/// Versions are totally ordered by major, minor, patch and then build type.
/// The derived ordering relies on that field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
    pub build_type: BuildType,
}

/// The version written into every file this crate produces.
pub const FORMAT_VERSION: Version = Version::new(0, 4, 0, BuildType::Dev);

impl Version {
    /// Creates a version.
    pub const fn new(major: u8, minor: u8, patch: u8, build_type: BuildType) -> Self {
        Self {
            major,
            minor,
            patch,
            build_type,
        }
    }
}

impl Default for Version {
    fn default() -> Self {
        FORMAT_VERSION
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}{}",
            self.major,
            self.minor,
            self.patch,
            self.build_type.suffix()
        )
    }
}

/// Compares two versions, returning -1, 0 or 1.
pub fn compare_versions(a: &Version, b: &Version) -> i32 {
    match a.cmp(b) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn build_type() -> impl Strategy<Value = BuildType> {
        (0u8..=4).prop_map(|b| BuildType::from_u8(b).unwrap())
    }

    fn version() -> impl Strategy<Value = Version> {
        (any::<u8>(), any::<u8>(), any::<u8>(), build_type())
            .prop_map(|(major, minor, patch, bt)| Version::new(major, minor, patch, bt))
    }

    #[test]
    fn test_compare_known_versions() {
        let a = Version::new(0, 0, 0, BuildType::Dev);
        let b = Version::new(0, 4, 0, BuildType::Dev);
        let c = Version::new(255, 255, 255, BuildType::Release);

        assert_eq!(compare_versions(&a, &a), 0);
        assert!(compare_versions(&a, &b) < 0);
        assert!(compare_versions(&c, &b) > 0);
    }

    #[test]
    fn test_build_type_breaks_ties() {
        let beta = Version::new(1, 2, 3, BuildType::Beta);
        let rc = Version::new(1, 2, 3, BuildType::Rc);
        assert_eq!(compare_versions(&beta, &rc), -1);
        assert_eq!(compare_versions(&rc, &beta), 1);
    }

    #[test]
    fn test_major_dominates() {
        let older = Version::new(0, 255, 255, BuildType::Release);
        let newer = Version::new(1, 0, 0, BuildType::Dev);
        assert_eq!(compare_versions(&older, &newer), -1);
    }

    #[test]
    fn test_build_type_wire_values() {
        for b in 0u8..=4 {
            assert_eq!(BuildType::from_u8(b).unwrap().as_u8(), b);
        }
        assert_eq!(BuildType::from_u8(5), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(FORMAT_VERSION.to_string(), "0.4.0-dev");
        assert_eq!(Version::new(1, 0, 2, BuildType::Release).to_string(), "1.0.2");
    }

    proptest! {
        #[test]
        fn prop_compare_is_transitive(a in version(), b in version(), c in version()) {
            if compare_versions(&a, &b) <= 0 && compare_versions(&b, &c) <= 0 {
                prop_assert!(compare_versions(&a, &c) <= 0);
            }
            if compare_versions(&a, &b) >= 0 && compare_versions(&b, &c) >= 0 {
                prop_assert!(compare_versions(&a, &c) >= 0);
            }
        }

        #[test]
        fn prop_compare_is_antisymmetric(a in version(), b in version()) {
            prop_assert_eq!(compare_versions(&a, &b), -compare_versions(&b, &a));
        }
    }
}
