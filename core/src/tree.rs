//! Read-only tree view model.
//!
//! Step nodes list their options as children and option nodes list their
//! continuation steps, mirroring how the chat runtime walks the flow.

use crate::model::{Step, StepOption, StepType};

/// Icon shown for a leaf node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeIcon {
    Comments,
    Image,
    List,
    Number,
    Circle,
}

impl NodeIcon {
    pub fn for_type(step_type: StepType) -> Self {
        match step_type {
            StepType::Mensaje | StepType::EntradaTexto => NodeIcon::Comments,
            StepType::EntradaImagen => NodeIcon::Image,
            StepType::SeleccionLista | StepType::SeleccionBotones => NodeIcon::List,
            StepType::EntradaNumero => NodeIcon::Number,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            NodeIcon::Comments => "💬",
            NodeIcon::Image => "🖼",
            NodeIcon::List => "☰",
            NodeIcon::Number => "#",
            NodeIcon::Circle => "•",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Stable key, e.g. `root-1-option-0-child-2`
    pub key: String,
    pub label: String,
    /// `tipo` badge; options have none
    pub step_type: Option<StepType>,
    pub icon: NodeIcon,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of nodes in this subtree, itself included
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::count).sum::<usize>()
    }
}

pub fn build_tree(steps: &[Step]) -> Vec<TreeNode> {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| step_node(step, format!("root-{}", i)))
        .collect()
}

fn step_node(step: &Step, key: String) -> TreeNode {
    let children = step
        .options()
        .iter()
        .enumerate()
        .map(|(i, option)| option_node(option, format!("{}-option-{}", key, i)))
        .collect();
    TreeNode {
        label: step.message.clone(),
        step_type: Some(step.step_type()),
        icon: NodeIcon::for_type(step.step_type()),
        children,
        key,
    }
}

fn option_node(option: &StepOption, key: String) -> TreeNode {
    let children = option
        .next_steps
        .iter()
        .enumerate()
        .map(|(i, step)| step_node(step, format!("{}-child-{}", key, i)))
        .collect();
    let label = if option.value.is_empty() {
        option.message.clone()
    } else {
        format!("{} (Opción {})", option.message, option.value)
    };
    TreeNode {
        label,
        step_type: None,
        icon: NodeIcon::Circle,
        children,
        key,
    }
}

/// Node reached by following child indices from the roots
pub fn node_at<'a>(nodes: &'a [TreeNode], at: &[usize]) -> Option<&'a TreeNode> {
    let (first, rest) = at.split_first()?;
    rest.iter()
        .try_fold(nodes.get(*first)?, |node, &i| node.children.get(i))
}

/// Indented plain-text rendering. Collapsed nodes hide their children.
pub fn render_text<F>(nodes: &[TreeNode], is_expanded: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut out = String::new();
    for node in nodes {
        render_node(node, 0, &is_expanded, &mut out);
    }
    out
}

fn render_node<F>(node: &TreeNode, level: usize, is_expanded: &F, out: &mut String)
where
    F: Fn(&str) -> bool,
{
    let expanded = is_expanded(&node.key);
    let marker = match (node.has_children(), expanded) {
        (true, true) => "▾",
        (true, false) => "▸",
        (false, _) => node.icon.glyph(),
    };
    out.push_str(&"  ".repeat(level));
    out.push_str(marker);
    out.push(' ');
    out.push_str(&node.label);
    if let Some(step_type) = node.step_type {
        out.push_str(&format!(" [{}]", step_type));
    }
    out.push('\n');

    if node.has_children() && expanded {
        for child in &node.children {
            render_node(child, level + 1, is_expanded, out);
        }
    }
}
