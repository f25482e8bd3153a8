//! Per-node-type sentence templates
//!
//! Each template is a pure function of one node. Optional clauses are only
//! appended when the planner supplied the attribute. A template returns
//! `None` when an attribute its sentence cannot do without is absent; the
//! registry then falls back to the bare node type.

use super::emphasis::Emphasis;
use crate::plan::PlanNode;

/// Signature shared by every template
pub type Template = fn(&PlanNode, &Emphasis) -> Option<String>;

/// Strip the `::text` casts the planner prints inside conditions
fn clean(s: &str) -> String {
    s.replace("::text", "")
}

/// Key list attribute; a lone string is treated as a one-element list
fn keys(node: &PlanNode, key: &str) -> Option<Vec<String>> {
    if let Some(items) = node.list(key) {
        return Some(items.to_vec());
    }
    node.text(key).map(|s| vec![s.to_string()])
}

/// Emphasise and comma-join keys, preserving input order
fn join_keys(keys: &[String], em: &Emphasis) -> String {
    keys.iter()
        .map(|k| em.wrap(&clean(k)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_count(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

pub(super) fn aggregate(node: &PlanNode, em: &Emphasis) -> Option<String> {
    let agg = em.wrap("Aggregate");
    let sentence = match node.text("Strategy") {
        Some("Sorted") => {
            let mut s = format!("{} operation is performed on the rows based on their keys.", agg);
            if let Some(group) = keys(node, "Group Key") {
                s.push_str(&format!(
                    " The {} key(s) are: {}.",
                    em.wrap("aggregated"),
                    join_keys(&group, em)
                ));
            }
            if let Some(filter) = node.text("Filter") {
                s.push_str(&format!(
                    " The rows are also filtered by {}.",
                    em.wrap(&clean(filter))
                ));
            }
            s
        }
        Some("Hashed") => match keys(node, "Group Key") {
            Some(group) => format!(
                "{} operation is performed by hashing on all rows based on the following \
                 key(s): {}, then the results are {} into bucket(s) according to the hashed key.",
                agg,
                join_keys(&group, em),
                em.wrap("aggregated")
            ),
            None => format!("{} operation is performed by hashing on all rows.", agg),
        },
        Some("Plain") => format!("Normal {} operation is performed on the result.", agg),
        _ => "Aggregation is performed.".to_string(),
    };
    Some(sentence)
}

pub(super) fn append(_node: &PlanNode, em: &Emphasis) -> Option<String> {
    Some(format!(
        "{} operation is performed with multiple sub-operations. \
         All the rows are returned as one set as the result.",
        em.wrap("Append")
    ))
}

pub(super) fn cte_scan(node: &PlanNode, em: &Emphasis) -> Option<String> {
    let name = node.text("CTE Name")?;
    let mut s = format!(
        "A {} operation is performed on the table {} which is stored in memory",
        em.wrap("CTE scan"),
        em.wrap(name)
    );
    if let Some(cond) = node.text("Index Cond") {
        s.push_str(&format!(" with the condition(s) {}", em.wrap(&clean(cond))));
    }
    if let Some(filter) = node.text("Filter") {
        s.push_str(&format!(
            ", the result is then filtered by {}",
            em.wrap(&clean(filter))
        ));
    }
    s.push('.');
    Some(s)
}

pub(super) fn function_scan(node: &PlanNode, em: &Emphasis) -> Option<String> {
    let function = node.text("Function Name")?;
    Some(format!(
        "The function {} is run and returns all the recordset(s) that it created.",
        em.wrap(function)
    ))
}

pub(super) fn group(node: &PlanNode, em: &Emphasis) -> Option<String> {
    let group = keys(node, "Group Key")?;
    Some(format!(
        "The result from the previous operation is {} by the following key(s): {}.",
        em.wrap("grouped"),
        join_keys(&group, em)
    ))
}

pub(super) fn index_scan(node: &PlanNode, em: &Emphasis) -> Option<String> {
    let index = node.text("Index Name")?;
    let relation = node.text("Relation Name")?;
    let mut s = format!(
        "{} operation is performed using the {} index",
        em.wrap("Index Scan"),
        em.wrap(index)
    );
    if let Some(cond) = node.text("Index Cond") {
        s.push_str(&format!(
            " with the following condition(s): {}",
            em.wrap(&clean(cond))
        ));
    }
    s.push_str(&format!(
        ", and fetches the rows of the {} table that match the conditions.",
        em.wrap(relation)
    ));
    if let Some(filter) = node.text("Filter") {
        s.push_str(&format!(
            " The result is then filtered by {}.",
            em.wrap(&clean(filter))
        ));
    }
    Some(s)
}

pub(super) fn index_only_scan(node: &PlanNode, em: &Emphasis) -> Option<String> {
    let index = node.text("Index Name")?;
    let mut s = format!(
        "An {} operation is done using the {} index",
        em.wrap("Index Only Scan"),
        em.wrap(index)
    );
    if let Some(cond) = node.text("Index Cond") {
        s.push_str(&format!(" with the condition(s) {}", em.wrap(&clean(cond))));
    }
    s.push_str(". Matches are then returned as the result.");
    if let Some(filter) = node.text("Filter") {
        s.push_str(&format!(
            " The result is finally filtered by: {}.",
            em.wrap(&clean(filter))
        ));
    }
    Some(s)
}

pub(super) fn limit(node: &PlanNode, em: &Emphasis) -> Option<String> {
    let rows = node.number("Plan Rows")?;
    Some(format!(
        "A scan is performed with a {} of {} entries.",
        em.wrap("limit"),
        format_count(rows)
    ))
}

pub(super) fn materialize(_node: &PlanNode, em: &Emphasis) -> Option<String> {
    Some(format!(
        "{} operation is performed. This means the results of previous operation(s) \
         are stored in physical memory/disk for faster access.",
        em.wrap("Materialize")
    ))
}

pub(super) fn unique(_node: &PlanNode, em: &Emphasis) -> Option<String> {
    Some(format!(
        "A scan is performed on previous results to remove {} values.",
        em.wrap("non-unique")
    ))
}

pub(super) fn merge_join(node: &PlanNode, em: &Emphasis) -> Option<String> {
    let mut s = format!(
        "{} operation is performed on results from sub-operations",
        em.wrap("Merge Join")
    );
    if let Some(cond) = node.text("Merge Cond") {
        s.push_str(&format!(" on the condition {}", em.wrap(&clean(cond))));
    }
    if node.text("Join Type") == Some("Semi") {
        s.push_str(" but only the rows from the left relation are returned as the result");
    }
    s.push('.');
    Some(s)
}

pub(super) fn set_op(node: &PlanNode, em: &Emphasis) -> Option<String> {
    let command = node.text("Command")?;
    let relation = match command {
        "Except" | "Except All" => "differences",
        _ => "similarities",
    };
    Some(format!(
        "Results are returned based on the {} between the two previously scanned tables \
         using the {} operation.",
        relation,
        em.wrap(command)
    ))
}

pub(super) fn subquery_scan(_node: &PlanNode, em: &Emphasis) -> Option<String> {
    Some(format!(
        "{} operation is performed on results from sub-operations without any changes.",
        em.wrap("Subquery scan")
    ))
}

pub(super) fn values_scan(_node: &PlanNode, em: &Emphasis) -> Option<String> {
    Some(format!(
        "A {} operation is performed using the values given in query.",
        em.wrap("Values Scan")
    ))
}

pub(super) fn seq_scan(node: &PlanNode, em: &Emphasis) -> Option<String> {
    let mut s = format!(
        "{} operation is performed on relation",
        em.wrap("Sequential Scan")
    );
    let relation = node.text("Relation Name");
    if let Some(relation) = relation {
        s.push(' ');
        s.push_str(&em.wrap(relation));
    }
    if let Some(alias) = node.text("Alias") {
        if Some(alias) != relation {
            s.push_str(&format!(" with the alias of {}", em.wrap(alias)));
        }
    }
    if let Some(filter) = node.text("Filter") {
        s.push_str(&format!(" and filtered by {}", em.wrap(&clean(filter))));
    }
    s.push('.');
    Some(s)
}

pub(super) fn nested_loop(_node: &PlanNode, em: &Emphasis) -> Option<String> {
    Some(format!(
        "{} is performed to join results between the scans of the sub-operations.",
        em.wrap("Nested Loop")
    ))
}

/// Direction is read from the literal substrings `DESC` and `INC` in the
/// key text. Whichever matches is removed from the displayed key, and the
/// whitespace left at either end is trimmed. Separators inside the key
/// are kept as they were.
pub(super) fn sort(node: &PlanNode, em: &Emphasis) -> Option<String> {
    let key = keys(node, "Sort Key")?.join(", ");
    let mut s = format!("The result is {} using the attribute ", em.wrap("Sorted"));
    if key.contains("DESC") {
        let shown = key.replace("DESC", "");
        s.push_str(&format!("{} in descending order", em.wrap(shown.trim())));
    } else if key.contains("INC") {
        let shown = key.replace("INC", "");
        s.push_str(&format!("{} in ascending order", em.wrap(shown.trim())));
    } else {
        s.push_str(&em.wrap(&key));
    }
    s.push('.');
    Some(s)
}

pub(super) fn hash(_node: &PlanNode, em: &Emphasis) -> Option<String> {
    Some(format!(
        "{} function is used to make a memory {} using the table rows.",
        em.wrap("Hash"),
        em.wrap("hash")
    ))
}

pub(super) fn hash_join(node: &PlanNode, em: &Emphasis) -> Option<String> {
    let join_type = node.text("Join Type")?;
    let mut s = format!(
        "The result from previous operation is joined using {} {} {}",
        em.wrap("Hash"),
        em.wrap(join_type),
        em.wrap("Join")
    );
    if let Some(cond) = node.text("Hash Cond") {
        s.push_str(&format!(" on the condition: {}", em.wrap(&clean(cond))));
    }
    s.push('.');
    Some(s)
}

pub(super) fn bitmap_heap_scan(node: &PlanNode, em: &Emphasis) -> Option<String> {
    let relation = node.text("Relation Name")?;
    let cond = node.text("Recheck Cond")?;
    Some(format!(
        "With the result from the previous {}, {} is performed on the {} table to get results \
         matching the condition {} which is used to create the Bitmap.",
        em.wrap("Bitmap Index Scan"),
        em.wrap("Bitmap Heap Scan"),
        em.wrap(relation),
        em.wrap(&clean(cond))
    ))
}

pub(super) fn bitmap_index_scan(node: &PlanNode, em: &Emphasis) -> Option<String> {
    let index = node.text("Index Name")?;
    let cond = node.text("Index Cond")?;
    Some(format!(
        "{} is performed on {} with index condition of {} to create a Bitmap.",
        em.wrap("Bitmap Index Scan"),
        em.wrap(index),
        em.wrap(&clean(cond))
    ))
}

pub(super) fn memoize(node: &PlanNode, em: &Emphasis) -> Option<String> {
    let cache_key = node.text("Cache Key")?;
    Some(format!(
        "The previous sub-operation result is then {}. This means that the result is cached \
         with cache key of {}.",
        em.wrap("Memoized"),
        em.wrap(&clean(cache_key))
    ))
}

pub(super) fn gather_merge(_node: &PlanNode, em: &Emphasis) -> Option<String> {
    Some(format!(
        "{} operation is performed on the results from parallel sub-operations. \
         The results {} order is preserved.",
        em.wrap("Gather Merge"),
        em.wrap("Sorted")
    ))
}

pub(super) fn gather(_node: &PlanNode, em: &Emphasis) -> Option<String> {
    Some(format!(
        "{} operation is performed on the results from parallel sub-operations. \
         The results order is {} preserved unlike {}.",
        em.wrap("Gather"),
        em.wrap("Not"),
        em.wrap("Gather Merge")
    ))
}
