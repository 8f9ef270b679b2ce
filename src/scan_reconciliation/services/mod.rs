pub mod reconciliation;
pub mod upgrade_packages;

pub use reconciliation::{reconcile, vulnerabilities_fixable_by_upgrade, ReconciliationVerdict};
pub use upgrade_packages::{distribution_package_name, merge_upgrade_package_list};
