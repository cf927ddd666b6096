//! Derived employee nodes of the reporting forest.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A node in the reporting forest.
///
/// Children are referenced by id; the owning `Forest` resolves them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub position: String,
    /// Depth in the reporting forest, roots are tier 1. Zero until built.
    pub tier: u32,
    /// `employee_id` of the manager once built. Before the build this holds
    /// the raw `reporting_to` code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Ids of direct reports, in source order.
    pub children: Vec<String>,
}

impl Employee {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn hierarchy_label(&self) -> String {
        hierarchy_label(self.tier)
    }
}

/// Nested view of a subtree, for rendering.
///
/// Reporting chains can be thousands deep, so dropping and encoding are
/// done with explicit stacks. Use [`trees_to_json`] rather than serde.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeTree {
    pub id: String,
    pub name: String,
    pub position: String,
    pub tier: u32,
    pub hierarchy_label: String,
    pub parent_id: Option<String>,
    pub children: Vec<EmployeeTree>,
}

impl Drop for EmployeeTree {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Encode trees as a JSON array with camelCase keys; `parentId` is omitted
/// for roots.
pub fn trees_to_json(trees: &[EmployeeTree]) -> String {
    let mut out = String::from("[");
    // Each frame: remaining siblings, and whether one was already written.
    let mut stack = vec![(trees.iter(), false)];

    while let Some((siblings, written)) = stack.last_mut() {
        match siblings.next() {
            Some(node) => {
                if *written {
                    out.push(',');
                }
                *written = true;
                write_node_head(node, &mut out);
                stack.push((node.children.iter(), false));
            }
            None => {
                stack.pop();
                out.push(']');
                if !stack.is_empty() {
                    out.push('}');
                }
            }
        }
    }

    out
}

/// Everything of a node up to and including the opening `[` of `children`.
fn write_node_head(node: &EmployeeTree, out: &mut String) {
    out.push_str("{\"id\":");
    push_json_str(out, &node.id);
    out.push_str(",\"name\":");
    push_json_str(out, &node.name);
    out.push_str(",\"position\":");
    push_json_str(out, &node.position);
    out.push_str(",\"tier\":");
    out.push_str(&node.tier.to_string());
    out.push_str(",\"hierarchyLabel\":");
    push_json_str(out, &node.hierarchy_label);
    if let Some(parent_id) = &node.parent_id {
        out.push_str(",\"parentId\":");
        push_json_str(out, parent_id);
    }
    out.push_str(",\"children\":[");
}

fn push_json_str(out: &mut String, value: &str) {
    out.push_str(&Value::from(value).to_string());
}

/// Human-readable name for a tier.
pub fn hierarchy_label(tier: u32) -> String {
    let label = match tier {
        1 => "Board of Directors",
        2 => "Executive",
        3 => "Senior Management",
        4 => "Area Manager",
        5 => "Venue Manager",
        6 => "Junior Staff",
        7 => "Helper",
        8 => "Intern",
        _ => return format!("Tier {}", tier),
    };
    label.to_string()
}
