//! Catalog of the metric identifiers exposed by the provider.
//!
//! Identifiers are available two ways: as typed constants grouped in
//! modules (`cache::BYTES_READ`), and as an immutable tree returned by
//! [`registry`], where categories and leaves are distinct variants.

use crate::error::{MeasurementError, Result};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::warn;

pub const CONNECTIONS: &str = "CONNECTIONS";

pub mod asserts {
    pub const REGULAR: &str = "ASSERT_REGULAR";
    pub const WARNING: &str = "ASSERT_WARNING";
    pub const MSG: &str = "ASSERT_MSG";
    pub const USER: &str = "ASSERT_USER";
}

pub mod cache {
    pub const BYTES_READ: &str = "CACHE_BYTES_READ_INTO";
    pub const BYTES_WRITTEN: &str = "CACHE_BYTES_WRITTEN_FROM";
    pub const DIRTY: &str = "CACHE_DIRTY_BYTES";
    pub const USED: &str = "CACHE_USED_BYTES";
}

pub mod cursors {
    pub const OPEN: &str = "CURSORS_TOTAL_OPEN";
    pub const TIMED_OUT: &str = "CURSORS_TOTAL_TIMED_OUT";
}

pub mod db {
    pub const STORAGE: &str = "DB_STORAGE_TOTAL";
    pub const DATA_SIZE: &str = "DB_DATA_SIZE_TOTAL";
}

pub mod document_metrics {
    pub const RETURNED: &str = "DOCUMENT_METRICS_RETURNED";
    pub const INSERTED: &str = "DOCUMENT_METRICS_INSERTED";
    pub const UPDATED: &str = "DOCUMENT_METRICS_UPDATED";
    pub const DELETED: &str = "DOCUMENT_METRICS_DELETED";
}

pub mod extra_info {
    pub const PAGE_FAULTS: &str = "EXTRA_INFO_PAGE_FAULTS";
}

pub mod global_lock_current_queue {
    pub const TOTAL: &str = "GLOBAL_LOCK_CURRENT_QUEUE_TOTAL";
    pub const READERS: &str = "GLOBAL_LOCK_CURRENT_QUEUE_READERS";
    pub const WRITERS: &str = "GLOBAL_LOCK_CURRENT_QUEUE_WRITERS";
}

pub mod memory {
    pub const RESIDENT: &str = "MEMORY_RESIDENT";
    pub const VIRTUAL: &str = "MEMORY_VIRTUAL";
    pub const MAPPED: &str = "MEMORY_MAPPED";
}

pub mod network {
    /// Misspelt name kept for existing callers, same identifier as [`BYTES_IN`].
    pub const BYTES_ID: &str = BYTES_IN;
    pub const BYTES_IN: &str = "NETWORK_BYTES_IN";
    pub const BYTES_OUT: &str = "NETWORK_BYTES_OUT";
    pub const NUM_REQUESTS: &str = "NETWORK_NUM_REQUESTS";
}

pub mod opcounter {
    pub const CMD: &str = "OPCOUNTER_CMD";
    pub const QUERY: &str = "OPCOUNTER_QUERY";
    pub const UPDATE: &str = "OPCOUNTER_UPDATE";
    pub const DELETE: &str = "OPCOUNTER_DELETE";
    pub const GETMORE: &str = "OPCOUNTER_GETMORE";
    pub const INSERT: &str = "OPCOUNTER_INSERT";

    pub mod repl {
        pub const CMD: &str = "OPCOUNTER_REPL_CMD";
        pub const UPDATE: &str = "OPCOUNTER_REPL_UPDATE";
        pub const DELETE: &str = "OPCOUNTER_REPL_DELETE";
        pub const INSERT: &str = "OPCOUNTER_REPL_INSERT";
    }
}

pub mod operations {
    pub const SCAN_AND_ORDER: &str = "OPERATIONS_SCAN_AND_ORDER";

    pub mod execution_time {
        pub const READS: &str = "OP_EXECUTION_TIME_READS";
        pub const WRITES: &str = "OP_EXECUTION_TIME_WRITES";
        pub const COMMANDS: &str = "OP_EXECUTION_TIME_COMMANDS";
    }
}

pub mod oplog {
    pub const MASTER_TIME: &str = "OPLOG_MASTER_TIME";
    pub const RATE: &str = "OPLOG_RATE_GB_PER_HOUR";
}

pub mod query_executor {
    pub const SCANNED: &str = "QUERY_EXECUTOR_SCANNED";
    pub const SCANNED_OBJECTS: &str = "QUERY_EXECUTOR_SCANNED_OBJECTS";
}

pub mod query_targeting_scanned {
    pub const PER_RETURNED: &str = "QUERY_TARGETING_SCANNED_PER_RETURNED";
    pub const OBJECTS_PER_RETURNED: &str = "QUERY_TARGETING_SCANNED_OBJECTS_PER_RETURNED";
}

pub mod tickets_available {
    pub const READS: &str = "TICKETS_AVAILABLE_READS";
    pub const WRITES: &str = "TICKETS_AVAILABLE_WRITES";
}

pub mod cpu {
    pub mod process {
        pub const USER: &str = "PROCESS_CPU_USER";
        pub const KERNEL: &str = "PROCESS_CPU_KERNEL";
        pub const CHILDREN_USER: &str = "PROCESS_CPU_CHILDREN_USER";
        pub const CHILDREN_KERNEL: &str = "PROCESS_CPU_CHILDREN_KERNEL";
    }

    pub mod process_normalized {
        pub const USER: &str = "PROCESS_NORMALIZED_CPU_USER";
        pub const KERNEL: &str = "PROCESS_NORMALIZED_CPU_KERNEL";
        pub const CHILDREN_USER: &str = "PROCESS_NORMALIZED_CPU_CHILDREN_USER";
        pub const CHILDREN_KERNEL: &str = "PROCESS_NORMALIZED_CPU_CHILDREN_KERNEL";
    }

    pub mod system {
        pub const USER: &str = "SYSTEM_CPU_USER";
        pub const KERNEL: &str = "SYSTEM_CPU_KERNEL";
        pub const NICE: &str = "SYSTEM_CPU_NICE";
        pub const IOWAIT: &str = "SYSTEM_CPU_IOWAIT";
        pub const IRQ: &str = "SYSTEM_CPU_IRQ";
        pub const SOFTIRQ: &str = "SYSTEM_CPU_SOFTIRQ";
        pub const GUEST: &str = "SYSTEM_CPU_GUEST";
        pub const STEAL: &str = "SYSTEM_CPU_STEAL";
    }

    pub mod system_normalized {
        pub const USER: &str = "SYSTEM_NORMALIZED_CPU_USER";
        pub const KERNEL: &str = "SYSTEM_NORMALIZED_CPU_KERNEL";
        pub const NICE: &str = "SYSTEM_NORMALIZED_CPU_NICE";
        pub const IOWAIT: &str = "SYSTEM_NORMALIZED_CPU_IOWAIT";
        pub const IRQ: &str = "SYSTEM_NORMALIZED_CPU_IRQ";
        pub const SOFTIRQ: &str = "SYSTEM_NORMALIZED_CPU_SOFTIRQ";
        pub const GUEST: &str = "SYSTEM_NORMALIZED_CPU_GUEST";
        pub const STEAL: &str = "SYSTEM_NORMALIZED_CPU_STEAL";
    }
}

pub mod disk {
    pub mod iops {
        pub const READ: &str = "DISK_PARTITION_IOPS_READ";
        pub const WRITE: &str = "DISK_PARTITION_IOPS_WRITE";
        pub const TOTAL: &str = "DISK_PARTITION_IOPS_TOTAL";
    }

    pub mod util {
        pub const UTILIZATION: &str = "DISK_PARTITION_UTILIZATION";
    }

    pub mod latency {
        pub const READ: &str = "DISK_PARTITION_LATENCY_READ";
        pub const WRITE: &str = "DISK_PARTITION_LATENCY_WRITE";
    }

    pub mod free {
        pub const SPACE_FREE: &str = "DISK_PARTITION_SPACE_FREE";
        pub const SPACE_USED: &str = "DISK_PARTITION_SPACE_USED";
        pub const PERCENT_FREE: &str = "DISK_PARTITION_SPACE_PERCENT_FREE";
        pub const PERCENT_USED: &str = "DISK_PARTITION_SPACE_PERCENT_USED";
    }
}

pub mod namespaces {
    pub const OBJECT_SIZE: &str = "DATABASE_AVERAGE_OBJECT_SIZE";
    pub const COLLECTION_COUNT: &str = "DATABASE_COLLECTION_COUNT";
    pub const DATA_SIZE: &str = "DATABASE_DATA_SIZE";
    pub const STORAGE_SIZE: &str = "DATABASE_STORAGE_SIZE";
    pub const INDEX_SIZE: &str = "DATABASE_INDEX_SIZE";
    pub const INDEX_COUNT: &str = "DATABASE_INDEX_COUNT";
    pub const EXTENT_COUNT: &str = "DATABASE_EXTENT_COUNT";
    pub const OBJECT_COUNT: &str = "DATABASE_OBJECT_COUNT";
    pub const VIEW_COUNT: &str = "DATABASE_VIEW_COUNT";
}

/// A node of the measurement type tree.
///
/// A leaf holds an identifier, a category holds named children in
/// declaration order. The variant alone decides what a node is.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasurementTypeNode {
    Leaf(&'static str),
    Category(Vec<(&'static str, MeasurementTypeNode)>),
}

impl MeasurementTypeNode {
    /// Every leaf identifier beneath this node, depth first, in declaration order.
    pub fn enumerate_leaves(&self) -> Vec<&'static str> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves(&self, leaves: &mut Vec<&'static str>) {
        match self {
            MeasurementTypeNode::Leaf(identifier) => leaves.push(*identifier),
            MeasurementTypeNode::Category(children) => {
                for (_, child) in children {
                    child.collect_leaves(leaves);
                }
            }
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, MeasurementTypeNode::Leaf(_))
    }

    /// Direct child by name, leaf or category.
    pub fn child(&self, name: &str) -> Option<&MeasurementTypeNode> {
        match self {
            MeasurementTypeNode::Leaf(_) => None,
            MeasurementTypeNode::Category(children) => children
                .iter()
                .find(|(child_name, _)| *child_name == name)
                .map(|(_, node)| node),
        }
    }

    /// Resolves a category from a path of category names, `["CPU", "Process"]`.
    ///
    /// An empty path resolves to this node.
    pub fn find_category(&self, path: &[&str]) -> Result<&MeasurementTypeNode> {
        let mut node = self;
        for name in path {
            node = node
                .child(name)
                .ok_or_else(|| MeasurementError::UnknownCategory(path.join("/")))?;
        }
        if node.is_leaf() {
            return Err(MeasurementError::UnknownCategory(path.join("/")));
        }
        Ok(node)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        match self {
            MeasurementTypeNode::Leaf(leaf) => *leaf == identifier,
            MeasurementTypeNode::Category(children) => {
                children.iter().any(|(_, child)| child.contains(identifier))
            }
        }
    }

    /// Checks that no identifier is declared twice beneath this node.
    pub fn validate_unique(&self) -> Result<()> {
        let mut seen: HashMap<&'static str, String> = HashMap::new();
        self.validate_unique_at("", &mut seen)
    }

    fn validate_unique_at(
        &self,
        path: &str,
        seen: &mut HashMap<&'static str, String>,
    ) -> Result<()> {
        match self {
            MeasurementTypeNode::Leaf(identifier) => {
                if let Some(first) = seen.get(identifier) {
                    return Err(MeasurementError::DuplicateIdentifier {
                        identifier: identifier.to_string(),
                        first: first.clone(),
                        second: path.to_string(),
                    });
                }
                seen.insert(*identifier, path.to_string());
                Ok(())
            }
            MeasurementTypeNode::Category(children) => {
                for (name, child) in children {
                    let child_path = if path.is_empty() {
                        name.to_string()
                    } else {
                        format!("{}/{}", path, name)
                    };
                    child.validate_unique_at(&child_path, seen)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct CategoryBuilder {
    children: Vec<(&'static str, MeasurementTypeNode)>,
}

impl CategoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leaf(mut self, name: &'static str, identifier: &'static str) -> Self {
        self.children.push((name, MeasurementTypeNode::Leaf(identifier)));
        self
    }

    pub fn category(mut self, name: &'static str, category: CategoryBuilder) -> Self {
        self.children.push((name, category.build()));
        self
    }

    pub fn build(self) -> MeasurementTypeNode {
        MeasurementTypeNode::Category(self.children)
    }
}

fn build_registry() -> MeasurementTypeNode {
    CategoryBuilder::new()
        .leaf("connections", CONNECTIONS)
        .category(
            "Asserts",
            CategoryBuilder::new()
                .leaf("regular", asserts::REGULAR)
                .leaf("warning", asserts::WARNING)
                .leaf("msg", asserts::MSG)
                .leaf("user", asserts::USER),
        )
        .category(
            "Cache",
            CategoryBuilder::new()
                .leaf("bytes_read", cache::BYTES_READ)
                .leaf("bytes_written", cache::BYTES_WRITTEN)
                .leaf("dirty", cache::DIRTY)
                .leaf("used", cache::USED),
        )
        .category(
            "Cursors",
            CategoryBuilder::new()
                .leaf("open", cursors::OPEN)
                .leaf("timed_out", cursors::TIMED_OUT),
        )
        .category(
            "Db",
            CategoryBuilder::new()
                .leaf("storage", db::STORAGE)
                .leaf("data_size", db::DATA_SIZE),
        )
        .category(
            "DocumentMetrics",
            CategoryBuilder::new()
                .leaf("returned", document_metrics::RETURNED)
                .leaf("inserted", document_metrics::INSERTED)
                .leaf("updated", document_metrics::UPDATED)
                .leaf("deleted", document_metrics::DELETED),
        )
        .category(
            "ExtraInfo",
            CategoryBuilder::new().leaf("page_faults", extra_info::PAGE_FAULTS),
        )
        .category(
            "GlobalLockCurrentQueue",
            CategoryBuilder::new()
                .leaf("total", global_lock_current_queue::TOTAL)
                .leaf("readers", global_lock_current_queue::READERS)
                .leaf("writers", global_lock_current_queue::WRITERS),
        )
        .category(
            "Memory",
            CategoryBuilder::new()
                .leaf("resident", memory::RESIDENT)
                .leaf("virtual", memory::VIRTUAL)
                .leaf("mapped", memory::MAPPED),
        )
        .category(
            "Network",
            CategoryBuilder::new()
                .leaf("bytes_in", network::BYTES_IN)
                .leaf("bytes_out", network::BYTES_OUT)
                .leaf("num_requests", network::NUM_REQUESTS),
        )
        .category(
            "Opcounter",
            CategoryBuilder::new()
                .leaf("cmd", opcounter::CMD)
                .leaf("query", opcounter::QUERY)
                .leaf("update", opcounter::UPDATE)
                .leaf("delete", opcounter::DELETE)
                .leaf("getmore", opcounter::GETMORE)
                .leaf("insert", opcounter::INSERT)
                .category(
                    "Repl",
                    CategoryBuilder::new()
                        .leaf("cmd", opcounter::repl::CMD)
                        .leaf("update", opcounter::repl::UPDATE)
                        .leaf("delete", opcounter::repl::DELETE)
                        .leaf("insert", opcounter::repl::INSERT),
                ),
        )
        .category(
            "Operations",
            CategoryBuilder::new()
                .leaf("scan_and_order", operations::SCAN_AND_ORDER)
                .category(
                    "ExecutionTime",
                    CategoryBuilder::new()
                        .leaf("reads", operations::execution_time::READS)
                        .leaf("writes", operations::execution_time::WRITES)
                        .leaf("commands", operations::execution_time::COMMANDS),
                ),
        )
        .category(
            "Oplog",
            CategoryBuilder::new()
                .leaf("master_time", oplog::MASTER_TIME)
                .leaf("rate", oplog::RATE),
        )
        .category(
            "QueryExecutor",
            CategoryBuilder::new()
                .leaf("scanned", query_executor::SCANNED)
                .leaf("scanned_objects", query_executor::SCANNED_OBJECTS),
        )
        .category(
            "QueryTargetingScanned",
            CategoryBuilder::new()
                .leaf("per_returned", query_targeting_scanned::PER_RETURNED)
                .leaf(
                    "objects_per_returned",
                    query_targeting_scanned::OBJECTS_PER_RETURNED,
                ),
        )
        .category(
            "TicketsAvailable",
            CategoryBuilder::new()
                .leaf("reads", tickets_available::READS)
                .leaf("writes", tickets_available::WRITES),
        )
        .category(
            "CPU",
            CategoryBuilder::new()
                .category(
                    "Process",
                    CategoryBuilder::new()
                        .leaf("user", cpu::process::USER)
                        .leaf("kernel", cpu::process::KERNEL)
                        .leaf("children_user", cpu::process::CHILDREN_USER)
                        .leaf("children_kernel", cpu::process::CHILDREN_KERNEL),
                )
                .category(
                    "ProcessNormalized",
                    CategoryBuilder::new()
                        .leaf("user", cpu::process_normalized::USER)
                        .leaf("kernel", cpu::process_normalized::KERNEL)
                        .leaf("children_user", cpu::process_normalized::CHILDREN_USER)
                        .leaf(
                            "children_kernel",
                            cpu::process_normalized::CHILDREN_KERNEL,
                        ),
                )
                .category(
                    "System",
                    CategoryBuilder::new()
                        .leaf("user", cpu::system::USER)
                        .leaf("kernel", cpu::system::KERNEL)
                        .leaf("nice", cpu::system::NICE)
                        .leaf("iowait", cpu::system::IOWAIT)
                        .leaf("irq", cpu::system::IRQ)
                        .leaf("softirq", cpu::system::SOFTIRQ)
                        .leaf("guest", cpu::system::GUEST)
                        .leaf("steal", cpu::system::STEAL),
                )
                .category(
                    "SystemNormalized",
                    CategoryBuilder::new()
                        .leaf("user", cpu::system_normalized::USER)
                        .leaf("kernel", cpu::system_normalized::KERNEL)
                        .leaf("nice", cpu::system_normalized::NICE)
                        .leaf("iowait", cpu::system_normalized::IOWAIT)
                        .leaf("irq", cpu::system_normalized::IRQ)
                        .leaf("softirq", cpu::system_normalized::SOFTIRQ)
                        .leaf("guest", cpu::system_normalized::GUEST)
                        .leaf("steal", cpu::system_normalized::STEAL),
                ),
        )
        .category(
            "Disk",
            CategoryBuilder::new()
                .category(
                    "IOPS",
                    CategoryBuilder::new()
                        .leaf("read", disk::iops::READ)
                        .leaf("write", disk::iops::WRITE)
                        .leaf("total", disk::iops::TOTAL),
                )
                .category(
                    "Util",
                    CategoryBuilder::new().leaf("utilization", disk::util::UTILIZATION),
                )
                .category(
                    "Latency",
                    CategoryBuilder::new()
                        .leaf("read", disk::latency::READ)
                        .leaf("write", disk::latency::WRITE),
                )
                .category(
                    "Free",
                    CategoryBuilder::new()
                        .leaf("space_free", disk::free::SPACE_FREE)
                        .leaf("space_used", disk::free::SPACE_USED)
                        .leaf("percent_free", disk::free::PERCENT_FREE)
                        .leaf("percent_used", disk::free::PERCENT_USED),
                ),
        )
        .category(
            "Namespaces",
            CategoryBuilder::new()
                .leaf("object_size", namespaces::OBJECT_SIZE)
                .leaf("collection_count", namespaces::COLLECTION_COUNT)
                .leaf("data_size", namespaces::DATA_SIZE)
                .leaf("storage_size", namespaces::STORAGE_SIZE)
                .leaf("index_size", namespaces::INDEX_SIZE)
                .leaf("index_count", namespaces::INDEX_COUNT)
                .leaf("extent_count", namespaces::EXTENT_COUNT)
                .leaf("object_count", namespaces::OBJECT_COUNT)
                .leaf("view_count", namespaces::VIEW_COUNT),
        )
        .build()
}

static REGISTRY: OnceLock<MeasurementTypeNode> = OnceLock::new();

/// Root of the measurement type tree, built on first use.
pub fn registry() -> &'static MeasurementTypeNode {
    REGISTRY.get_or_init(|| {
        let root = build_registry();
        if let Err(err) = root.validate_unique() {
            warn!("Measurement type registry integrity check failed: {}", err);
        }
        root
    })
}

/// Every identifier of the registry.
pub fn all_measurement_types() -> Vec<&'static str> {
    registry().enumerate_leaves()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_is_not_empty_and_unique() {
        let leaves = all_measurement_types();
        assert!(!leaves.is_empty());
        let unique: HashSet<_> = leaves.iter().collect();
        assert_eq!(unique.len(), leaves.len());
        registry().validate_unique().unwrap();
    }

    #[test]
    fn test_enumerate_sub_category() {
        let process = registry().find_category(&["CPU", "Process"]).unwrap();
        assert_eq!(
            process.enumerate_leaves(),
            vec![
                "PROCESS_CPU_USER",
                "PROCESS_CPU_KERNEL",
                "PROCESS_CPU_CHILDREN_USER",
                "PROCESS_CPU_CHILDREN_KERNEL",
            ]
        );

        // Nested categories are flattened too
        let cpu = registry().find_category(&["CPU"]).unwrap();
        assert_eq!(cpu.enumerate_leaves().len(), 24);
        let opcounter = registry().find_category(&["Opcounter"]).unwrap();
        let leaves = opcounter.enumerate_leaves();
        assert_eq!(leaves.len(), 10);
        assert_eq!(leaves[0], opcounter::CMD);
        assert_eq!(leaves[9], opcounter::repl::INSERT);
    }

    #[test]
    fn test_root_leaf_is_enumerated() {
        assert_eq!(all_measurement_types()[0], CONNECTIONS);
    }

    #[test]
    fn test_empty_category() {
        let empty = CategoryBuilder::new().build();
        assert!(empty.enumerate_leaves().is_empty());
        empty.validate_unique().unwrap();
    }

    #[test]
    fn test_uppercase_leaf_name_is_still_a_leaf() {
        let node = CategoryBuilder::new()
            .leaf("Total", "SOME_TOTAL")
            .category("Sub", CategoryBuilder::new().leaf("X", "SOME_X"))
            .build();
        assert_eq!(node.enumerate_leaves(), vec!["SOME_TOTAL", "SOME_X"]);
        assert!(node.child("Total").unwrap().is_leaf());
    }

    #[test]
    fn test_find_category_errors() {
        assert!(matches!(
            registry().find_category(&["Nope"]),
            Err(MeasurementError::UnknownCategory(path)) if path == "Nope"
        ));
        // A leaf is not a category
        assert!(registry().find_category(&["Cache", "used"]).is_err());
        assert_eq!(registry().find_category(&[]).unwrap(), registry());
    }

    #[test]
    fn test_contains() {
        assert!(registry().contains(cache::BYTES_READ));
        assert!(registry().contains(network::BYTES_ID));
        assert!(registry().contains(disk::free::PERCENT_USED));
        assert!(!registry().contains("NOT_A_METRIC"));
    }

    #[test]
    fn test_duplicate_detection() {
        let node = CategoryBuilder::new()
            .category(
                "Network",
                CategoryBuilder::new()
                    .leaf("bytes_id", network::BYTES_ID)
                    .leaf("bytes_in", network::BYTES_IN),
            )
            .build();
        match node.validate_unique() {
            Err(MeasurementError::DuplicateIdentifier {
                identifier,
                first,
                second,
            }) => {
                assert_eq!(identifier, "NETWORK_BYTES_IN");
                assert_eq!(first, "Network/bytes_id");
                assert_eq!(second, "Network/bytes_in");
            }
            other => panic!("Expected a duplicate error, got {:?}", other),
        }
    }
}
