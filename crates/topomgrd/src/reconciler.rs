//! Graph reconciliation (Stage 2).
//!
//! Assembles the global node set, builds observed links purely from
//! neighbor dumps, cross-references them against the declared edge set,
//! synthesizes links for declared-but-unseen edges, deduplicates every
//! link to one canonical direction, prunes unreferenced nodes, and
//! renumbers node and link identifiers into a dense deterministic range.
//!
//! Devices are always walked in sorted name order so the output is
//! reproducible across runs and platforms regardless of directory
//! listing order.

use crate::categorizer::Categorizer;
use crate::dump::DumpParse;
use crate::files::constants::{NA_VALUE, NONE_SENTINEL};
use crate::inventory::{AssetRecord, EndpointHosts};
use fabricmon_types::{DeclaredTopology, DeviceNode, Link, LinkPresence, NodeIcon};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tracing::{debug, info, warn};

/// Canonical undirected link identity: the 4-tuple and its reverse are
/// the same key.
type LinkKey = (String, String, String, String);

fn canonical_key(dev_a: &str, if_a: &str, dev_b: &str, if_b: &str) -> LinkKey {
    let forward = (
        dev_a.to_string(),
        if_a.to_string(),
        dev_b.to_string(),
        if_b.to_string(),
    );
    let reverse = (
        dev_b.to_string(),
        if_b.to_string(),
        dev_a.to_string(),
        if_a.to_string(),
    );
    forward.min(reverse)
}

/// Final reconciled graph plus reconciliation statistics.
#[derive(Debug, Clone, Default)]
pub struct Reconciled {
    /// Final node list, sorted by name, ids `0..N-1`.
    pub nodes: Vec<DeviceNode>,
    /// Deduplicated links referencing final node ids.
    pub links: Vec<Link>,
    /// Declared edges dropped because an endpoint device was unknown to
    /// the node set. Surfaced so silently-ignored declarations are
    /// visible to operators.
    pub skipped_declared: usize,
}

struct NodeSet {
    nodes: Vec<DeviceNode>,
    by_name: HashMap<String, usize>,
    host_only: HashSet<String>,
}

impl NodeSet {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            by_name: HashMap::new(),
            host_only: HashSet::new(),
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    fn id_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    fn add(&mut self, name: &str, asset: Option<&AssetRecord>, categorizer: &Categorizer) {
        if self.contains(name) {
            return;
        }
        let (layer, icon) = categorizer.categorize(name);
        let id = self.nodes.len();
        self.nodes.push(DeviceNode {
            id,
            name: name.to_string(),
            layer,
            icon,
            primary_ip: asset.map_or_else(|| NA_VALUE.to_string(), |a| a.ip.clone()),
            model: asset.map_or_else(|| NA_VALUE.to_string(), |a| a.model.clone()),
            serial_number: asset.map_or_else(|| NA_VALUE.to_string(), |a| a.serial.clone()),
            software_version: asset.map_or_else(|| NA_VALUE.to_string(), |a| a.version.clone()),
        });
        self.by_name.insert(name.to_string(), id);
        if asset.is_none() {
            self.host_only.insert(name.to_string());
        }
    }
}

/// Reconciles observed neighbor data against the declared topology into
/// the final visualization graph.
pub fn reconcile(
    inventory: &[AssetRecord],
    endpoints: &EndpointHosts,
    dumps: &BTreeMap<String, DumpParse>,
    declared: &DeclaredTopology,
    categorizer: &Categorizer,
) -> Reconciled {
    let mut set = NodeSet::new();

    // Step 1: node seeding from inventory, exact endpoint hosts, and
    // endpoint patterns matched against every advertised system name.
    for asset in inventory {
        set.add(&asset.name, Some(asset), categorizer);
    }
    for host in &endpoints.exact {
        set.add(host, None, categorizer);
    }
    let advertised: BTreeSet<&str> = dumps
        .values()
        .flat_map(|p| p.neighbors.iter().map(|r| r.remote_sys_name.as_str()))
        .collect();
    let patterns = endpoints.compiled_patterns();
    for name in advertised {
        if !set.contains(name) && patterns.iter().any(|re| re.is_match(name)) {
            debug!("Admitting pattern-matched endpoint host {}", name);
            set.add(name, None, categorizer);
        }
    }

    // Step 2: observed-link construction from the dumps.
    let mut links: Vec<Link> = Vec::new();
    let mut observed: HashSet<LinkKey> = HashSet::new();
    for (device, parse) in dumps {
        let Some(source_id) = set.id_of(device) else {
            continue;
        };
        for record in &parse.neighbors {
            let Some(target_id) = set.id_of(&record.remote_sys_name) else {
                continue;
            };
            let (status, speed) = port_info(dumps, device, &record.local_interface);
            let (t_status, t_speed) =
                port_info(dumps, &record.remote_sys_name, &record.remote_port_id);
            links.push(Link {
                id: 0,
                source: source_id,
                source_device: device.clone(),
                source_if_name: record.local_interface.clone(),
                source_port_status: status,
                source_port_speed: speed,
                target: target_id,
                target_device: record.remote_sys_name.clone(),
                target_if_name: record.remote_port_id.clone(),
                target_port_status: t_status,
                target_port_speed: t_speed,
                is_missing: LinkPresence::Observed,
            });
            observed.insert(canonical_key(
                device,
                &record.local_interface,
                &record.remote_sys_name,
                &record.remote_port_id,
            ));
        }
    }

    // Step 3: an observed link declared in neither orientation works
    // but is undocumented.
    for link in &mut links {
        if !declared.contains_pair(
            &link.source_device,
            &link.source_if_name,
            &link.target_device,
            &link.target_if_name,
        ) {
            link.is_missing = LinkPresence::Undeclared;
        }
    }

    // Step 4: synthesize links for declared edges never observed from
    // either side. Edges with an endpoint outside the node set are
    // counted rather than silently dropped.
    let mut skipped_declared = 0;
    for edge in declared.iter() {
        let (a, b) = (edge.a(), edge.b());
        // Sentinel edges document an intentionally empty port. They are
        // Stage 1 material only, never a graph link.
        if a.device == NONE_SENTINEL || b.device == NONE_SENTINEL {
            continue;
        }
        if observed.contains(&canonical_key(&a.device, &a.port, &b.device, &b.port)) {
            continue;
        }
        let (Some(source_id), Some(target_id)) = (set.id_of(&a.device), set.id_of(&b.device))
        else {
            warn!(
                "Declared edge {}:{} -- {}:{} references a device outside the node set, skipping",
                a.device, a.port, b.device, b.port
            );
            skipped_declared += 1;
            continue;
        };
        let (status, speed) = port_info(dumps, &a.device, &a.port);
        let (t_status, t_speed) = port_info(dumps, &b.device, &b.port);
        links.push(Link {
            id: 0,
            source: source_id,
            source_device: a.device.clone(),
            source_if_name: a.port.clone(),
            source_port_status: status,
            source_port_speed: speed,
            target: target_id,
            target_device: b.device.clone(),
            target_if_name: b.port.clone(),
            target_port_status: t_status,
            target_port_speed: t_speed,
            is_missing: LinkPresence::Missing,
        });
    }

    // Step 5: deduplicate to one canonical direction, first kept wins.
    let mut seen: HashSet<LinkKey> = HashSet::new();
    links.retain(|link| {
        let (da, ia, db, ib) = link.tuple();
        seen.insert(canonical_key(da, ia, db, ib))
    });

    // Step 6: recompute the node set as inventory devices plus every
    // link endpoint; discard seeded nodes nothing references.
    let inventory_names: HashSet<&str> = inventory.iter().map(|a| a.name.as_str()).collect();
    let referenced: HashSet<&str> = links
        .iter()
        .flat_map(|l| [l.source_device.as_str(), l.target_device.as_str()])
        .chain(inventory_names.iter().copied())
        .collect();
    let mut nodes: Vec<DeviceNode> = set
        .nodes
        .iter()
        .filter(|n| referenced.contains(n.name.as_str()))
        .cloned()
        .collect();

    // Step 7: an inventory device with no dump at all should have
    // reported; unless it is a known endpoint class, mark it unknown.
    for node in &mut nodes {
        if inventory_names.contains(node.name.as_str())
            && !set.host_only.contains(&node.name)
            && !dumps.contains_key(&node.name)
            && !node.icon.is_endpoint()
        {
            debug!("Device {} produced no dump, marking unreachable", node.name);
            node.icon = NodeIcon::Unknown;
        }
    }

    // Step 8: deterministic renumbering. Sort by name, assign dense ids,
    // remap every link endpoint through the old-to-new mapping.
    nodes.sort_by(|a, b| a.name.cmp(&b.name));
    let remap: HashMap<usize, usize> = nodes
        .iter()
        .enumerate()
        .map(|(new_id, node)| (node.id, new_id))
        .collect();
    for (new_id, node) in nodes.iter_mut().enumerate() {
        node.id = new_id;
    }
    let mut final_links = Vec::with_capacity(links.len());
    for (id, mut link) in links.into_iter().enumerate() {
        let (Some(&source), Some(&target)) = (remap.get(&link.source), remap.get(&link.target))
        else {
            // Unreachable by construction: pruning keeps every link
            // endpoint. Guarded anyway so a bug cannot emit a dangling
            // reference.
            warn!(
                "Link {}:{} -- {}:{} lost an endpoint during pruning, dropping it",
                link.source_device, link.source_if_name, link.target_device, link.target_if_name
            );
            continue;
        };
        link.id = id;
        link.source = source;
        link.target = target;
        final_links.push(link);
    }

    info!(
        "Reconciled {} nodes, {} links ({} declared edges skipped)",
        nodes.len(),
        final_links.len(),
        skipped_declared
    );

    Reconciled {
        nodes,
        links: final_links,
        skipped_declared,
    }
}

/// Looks up one side's port status and speed from that device's own
/// dump tables. `"N/A"`/0 when the device has no dump or the port is
/// absent from its tables.
fn port_info(dumps: &BTreeMap<String, DumpParse>, device: &str, port: &str) -> (String, u64) {
    match dumps.get(device) {
        Some(parse) => (
            parse
                .port_status
                .get(port)
                .map_or_else(|| NA_VALUE.to_string(), |s| s.to_string()),
            parse.port_speed.get(port).copied().unwrap_or(0),
        ),
        None => (NA_VALUE.to_string(), 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorizer::{CategoryConfig, Categorizer};
    use fabricmon_types::{DeclaredEdge, Endpoint, NeighborRecord, NodeIcon, PortState};
    use pretty_assertions::assert_eq;

    fn categorizer() -> Categorizer {
        let config: CategoryConfig = serde_yaml::from_str(
            r#"
device_categories:
  - { pattern: "^sw", layer: 1, icon: switch }
  - { pattern: "^compute", layer: 3, icon: server }
default:
  layer: 2
  icon: unknown
"#,
        )
        .unwrap();
        Categorizer::new(&config)
    }

    fn asset(name: &str) -> AssetRecord {
        AssetRecord {
            name: name.to_string(),
            ip: "10.0.0.1".to_string(),
            mac: "44:38:39:00:00:01".to_string(),
            serial: "MT001".to_string(),
            model: "MSN2700".to_string(),
            version: "3.7.2".to_string(),
        }
    }

    fn declared(edges: &[(&str, &str, &str, &str)]) -> DeclaredTopology {
        let mut topo = DeclaredTopology::new();
        for (da, pa, db, pb) in edges {
            topo.insert(DeclaredEdge::new(
                Endpoint::new(*da, *pa),
                Endpoint::new(*db, *pb),
            ));
        }
        topo
    }

    fn dump_with(neighbors: Vec<NeighborRecord>, status: &[(&str, PortState)]) -> DumpParse {
        DumpParse {
            neighbors,
            port_status: status.iter().map(|(p, s)| (p.to_string(), *s)).collect(),
            port_speed: [("swp1".to_string(), 100_000u64)].into_iter().collect(),
        }
    }

    /// Both devices advertise each other; declared; exactly one link.
    fn two_switch_dumps() -> BTreeMap<String, DumpParse> {
        let mut dumps = BTreeMap::new();
        dumps.insert(
            "sw1".to_string(),
            dump_with(
                vec![NeighborRecord::new("swp1", "sw2", "swp1")],
                &[("swp1", PortState::Up)],
            ),
        );
        dumps.insert(
            "sw2".to_string(),
            dump_with(
                vec![NeighborRecord::new("swp1", "sw1", "swp1")],
                &[("swp1", PortState::Up)],
            ),
        );
        dumps
    }

    #[test]
    fn test_confirmed_link_deduplicated_to_one() {
        let inventory = vec![asset("sw1"), asset("sw2")];
        let result = reconcile(
            &inventory,
            &EndpointHosts::default(),
            &two_switch_dumps(),
            &declared(&[("sw1", "swp1", "sw2", "swp1")]),
            &categorizer(),
        );
        assert_eq!(result.links.len(), 1);
        assert_eq!(result.links[0].is_missing, LinkPresence::Observed);
        assert_eq!(result.links[0].source_device, "sw1");
        assert_eq!(result.links[0].source_port_status, "UP");
        assert_eq!(result.links[0].source_port_speed, 100_000);
        assert_eq!(result.links[0].target_port_status, "UP");
    }

    #[test]
    fn test_observed_but_undeclared_is_fail() {
        let inventory = vec![asset("sw1"), asset("sw2")];
        let result = reconcile(
            &inventory,
            &EndpointHosts::default(),
            &two_switch_dumps(),
            &DeclaredTopology::new(),
            &categorizer(),
        );
        assert_eq!(result.links.len(), 1);
        assert_eq!(result.links[0].is_missing, LinkPresence::Undeclared);
    }

    #[test]
    fn test_declared_but_unseen_is_missing() {
        let inventory = vec![asset("sw1"), asset("sw2")];
        let result = reconcile(
            &inventory,
            &EndpointHosts::default(),
            &BTreeMap::new(),
            &declared(&[("sw1", "swp1", "sw2", "swp3")]),
            &categorizer(),
        );
        assert_eq!(result.links.len(), 1);
        assert_eq!(result.links[0].is_missing, LinkPresence::Missing);
        assert_eq!(result.links[0].source_port_status, "N/A");
        assert_eq!(result.links[0].target_port_speed, 0);
    }

    #[test]
    fn test_no_duplicate_undirected_links() {
        let inventory = vec![asset("sw1"), asset("sw2")];
        let result = reconcile(
            &inventory,
            &EndpointHosts::default(),
            &two_switch_dumps(),
            &declared(&[("sw1", "swp1", "sw2", "swp1")]),
            &categorizer(),
        );
        for (i, l1) in result.links.iter().enumerate() {
            for l2 in &result.links[i + 1..] {
                let t1 = l1.tuple();
                let t2 = l2.tuple();
                let r2 = (t2.2, t2.3, t2.0, t2.1);
                assert_ne!(t1, t2);
                assert_ne!(t1, r2);
            }
        }
    }

    #[test]
    fn test_referential_integrity_and_dense_ids() {
        let inventory = vec![asset("sw1"), asset("sw2"), asset("sw3")];
        let mut dumps = two_switch_dumps();
        dumps.insert(
            "sw3".to_string(),
            dump_with(vec![NeighborRecord::new("swp2", "sw1", "swp2")], &[]),
        );
        let result = reconcile(
            &inventory,
            &EndpointHosts::default(),
            &dumps,
            &declared(&[("sw1", "swp1", "sw2", "swp1")]),
            &categorizer(),
        );

        let ids: Vec<usize> = result.nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, (0..result.nodes.len()).collect::<Vec<_>>());

        for link in &result.links {
            assert_eq!(result.nodes[link.source].name, link.source_device);
            assert_eq!(result.nodes[link.target].name, link.target_device);
        }
    }

    #[test]
    fn test_nodes_sorted_by_name() {
        let inventory = vec![asset("sw2"), asset("sw1")];
        let result = reconcile(
            &inventory,
            &EndpointHosts::default(),
            &two_switch_dumps(),
            &DeclaredTopology::new(),
            &categorizer(),
        );
        let names: Vec<_> = result.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["sw1", "sw2"]);
    }

    #[test]
    fn test_pattern_matched_hosts_admitted_and_pruned() {
        let inventory = vec![asset("sw1")];
        let endpoints = EndpointHosts {
            exact: vec!["never-seen-host".to_string()],
            patterns: vec!["compute-*".to_string()],
        };
        let mut dumps = BTreeMap::new();
        dumps.insert(
            "sw1".to_string(),
            dump_with(
                vec![NeighborRecord::new("swp10", "compute-01", "eth1")],
                &[("swp10", PortState::Up)],
            ),
        );
        let result = reconcile(
            &inventory,
            &endpoints,
            &dumps,
            &DeclaredTopology::new(),
            &categorizer(),
        );

        let names: Vec<_> = result.nodes.iter().map(|n| n.name.as_str()).collect();
        // compute-01 is linked; never-seen-host is seeded but pruned.
        assert_eq!(names, vec!["compute-01", "sw1"]);
        let host = &result.nodes[0];
        assert_eq!(host.icon, NodeIcon::Server);
        assert_eq!(host.primary_ip, "N/A");
        assert_eq!(result.links.len(), 1);
    }

    #[test]
    fn test_silent_inventory_switch_marked_unknown() {
        // sw3 is in the inventory, linked via a declared edge, but has
        // no dump: it should have reported and did not.
        let inventory = vec![asset("sw1"), asset("sw2"), asset("sw3")];
        let result = reconcile(
            &inventory,
            &EndpointHosts::default(),
            &two_switch_dumps(),
            &declared(&[("sw1", "swp9", "sw3", "swp9")]),
            &categorizer(),
        );
        let sw3 = result.nodes.iter().find(|n| n.name == "sw3").unwrap();
        assert_eq!(sw3.icon, NodeIcon::Unknown);
        let sw1 = result.nodes.iter().find(|n| n.name == "sw1").unwrap();
        assert_eq!(sw1.icon, NodeIcon::Switch);
    }

    #[test]
    fn test_unknown_declared_endpoint_counted_not_silent() {
        let inventory = vec![asset("sw1")];
        let result = reconcile(
            &inventory,
            &EndpointHosts::default(),
            &BTreeMap::new(),
            &declared(&[("sw1", "swp1", "ghost", "swp1")]),
            &categorizer(),
        );
        assert_eq!(result.skipped_declared, 1);
        assert!(result.links.is_empty());
    }

    #[test]
    fn test_none_sentinel_edge_is_not_a_skipped_declaration() {
        // "sw1:swp40" -- "None:None" asserts nothing should be
        // connected; it must produce neither a link nor a skipped-edge
        // warning count.
        let inventory = vec![asset("sw1")];
        let result = reconcile(
            &inventory,
            &EndpointHosts::default(),
            &BTreeMap::new(),
            &declared(&[("sw1", "swp40", "None", "None")]),
            &categorizer(),
        );
        assert_eq!(result.skipped_declared, 0);
        assert!(result.links.is_empty());
    }

    #[test]
    fn test_empty_inputs_degrade_gracefully() {
        let result = reconcile(
            &[],
            &EndpointHosts::default(),
            &BTreeMap::new(),
            &DeclaredTopology::new(),
            &categorizer(),
        );
        assert!(result.nodes.is_empty());
        assert!(result.links.is_empty());
        assert_eq!(result.skipped_declared, 0);
    }
}
