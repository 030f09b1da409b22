//! Service tests for profile upkeep.
