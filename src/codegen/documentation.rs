use itertools::Itertools;

use crate::{
    embedded::FileMode,
    flatten::{SortedRecord, SortedTree},
};


fn prepend_lines_with_inner_line_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            if line.is_empty() {
                "//!".to_string()
            } else {
                format!("//! {}", line)
            }
        })
        .join("\n")
}


fn describe_record(record: &SortedRecord) -> String {
    let base_name = record.as_embedded().base_name();

    match record.mode() {
        FileMode::Directory => format!("{}/", base_name),
        FileMode::Executable | FileMode::Regular => {
            let human_size = humansize::format_size(record.content().len(), humansize::BINARY);

            if record.mode() == FileMode::Executable {
                format!("{} (executable, {})", base_name, human_size)
            } else {
                format!("{} ({})", base_name, human_size)
            }
        }
    }
}


/// Renders the embedded tree by following the `child` and `next` links,
/// which means the rendering is only correct if the links are.
pub(crate) fn format_tree_structure_as_string(tree: &SortedTree) -> String {
    let records = tree.entries();
    let mut formatted_lines = vec![".".to_string()];


    struct PendingEntry {
        index: u32,
        depth: usize,
    }

    let mut depth_first_stack = Vec::new();

    if let Some(root_child) = records.first().and_then(|root| root.child()) {
        depth_first_stack.push(PendingEntry {
            index: root_child,
            depth: 1,
        });
    }


    while let Some(next_item) = depth_first_stack.pop() {
        let Some(record) = records.get(next_item.index as usize) else {
            continue;
        };

        // The sibling is pushed first so that the children of this entry are rendered before it.
        if let Some(next_sibling) = record.next() {
            depth_first_stack.push(PendingEntry {
                index: next_sibling,
                depth: next_item.depth,
            });
        }

        if let Some(first_child) = record.child() {
            depth_first_stack.push(PendingEntry {
                index: first_child,
                depth: next_item.depth + 1,
            });
        }


        let mut formatted_line = String::new();

        for _ in 0..(next_item.depth.saturating_sub(1)) {
            formatted_line.push_str("|   ");
        }

        formatted_line.push_str("|-- ");
        formatted_line.push_str(&describe_record(record));

        formatted_lines.push(formatted_line);
    }


    format!(
        "```md\n\
        {}\n\
        ```",
        formatted_lines.join("\n")
    )
}



/// Builds the inner documentation that starts every generated module.
pub(crate) fn construct_module_documentation(
    tree: &SortedTree,
    module_name: &str,
    regeneration_command: &str,
) -> String {
    let visually_formatted_file_tree = format_tree_structure_as_string(tree);

    let total_content_bytes: usize = tree
        .entries()
        .iter()
        .map(|record| record.content().len())
        .sum();


    format!(
        "\
//! @generated
//!
//! Embedded file system `{}`, generated by `fs-embed`
//! ({} entries, {} of file content).
//!
//! The full file tree is as follows:
{}
//!
//! <sup>DO NOT MODIFY THIS FILE. INSTEAD, MODIFY THE SOURCE DIRECTORY
//! AND REGENERATE THIS FILE by running the following in this file's directory:</sup>
//!
//! ```sh
//! {}
//! ```\
        ",
        module_name,
        tree.len(),
        humansize::format_size(total_content_bytes, humansize::BINARY),
        prepend_lines_with_inner_line_comments(&visually_formatted_file_tree),
        regeneration_command
    )
}
