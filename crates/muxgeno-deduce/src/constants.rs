//! Record and report format constants

// =============================================================================
// Input records
// =============================================================================

/// State token for a pool called mutant
pub const MUTANT_TOKEN: &str = "MUT";

/// State token for a pool called normal
pub const NORMAL_TOKEN: &str = "NORM";

/// Field delimiter within a record line
pub const FIELD_DELIMITER: char = ',';

// =============================================================================
// Report output
// =============================================================================

/// Prefix of the mutant count line
pub const MUT_COUNT_LABEL: &str = "MUT COUNT";

/// Prefix of the normal count line
pub const NORM_COUNT_LABEL: &str = "NORM COUNT";

/// Reason token for an experiment that cannot be uniquely resolved
pub const NONUNIQUE_TOKEN: &str = "NONUNIQUE";

/// Reason token for an experiment with contradictory calls
pub const INCONSISTENT_TOKEN: &str = "INCONSISTENT";
