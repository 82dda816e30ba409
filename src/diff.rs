// Recursive structural diff over two decoded documents.
//
// Produces one human-readable line per discrepancy, in a canonical order:
// lexical key order for mappings, index order for sequences. Two runs over
// equal inputs emit byte-identical output.
//
// Scalar comparison is strict: no cross-type coercion, so `1` and `"1"`
// differ. Both sides of a comparison are decoded by the same YAML layer,
// so manifests that agree on a field's type never hit the cross-type case.

use crate::document::Document;

/// Compare two documents and return the ordered list of difference lines.
///
/// An empty result means the documents are structurally equal. Pure
/// function of its inputs; the documents need not share shape.
pub fn diff(a: &Document, b: &Document) -> Vec<String> {
    let mut out = Vec::new();
    diff_at("", a, b, &mut out);
    out
}

fn diff_at(path: &str, a: &Document, b: &Document, out: &mut Vec<String>) {
    match (a, b) {
        (Document::Map(ma), Document::Map(mb)) => {
            // Union of keys, lexically ordered.
            let mut keys: Vec<&String> = ma.keys().chain(mb.keys()).collect();
            keys.sort();
            keys.dedup();
            for key in keys {
                let child = join_key(path, key);
                match (ma.get(key), mb.get(key)) {
                    (Some(va), Some(vb)) => diff_at(&child, va, vb, out),
                    (Some(_), None) => out.push(format!("{child}: removed")),
                    (None, Some(_)) => out.push(format!("{child}: added")),
                    (None, None) => unreachable!("key came from one of the maps"),
                }
            }
        }
        (Document::Seq(sa), Document::Seq(sb)) => {
            let common = sa.len().min(sb.len());
            for (i, (va, vb)) in sa.iter().zip(sb.iter()).take(common).enumerate() {
                diff_at(&join_index(path, i), va, vb, out);
            }
            for i in common..sa.len() {
                out.push(format!("{}: removed", join_index(path, i)));
            }
            for i in common..sb.len() {
                out.push(format!("{}: added", join_index(path, i)));
            }
        }
        // Scalars, and any shape mismatch: one line, no recursion below.
        _ => {
            if a != b {
                out.push(format!("{}: {a} != {b}", display_path(path)));
            }
        }
    }
}

fn join_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn join_index(path: &str, index: usize) -> String {
    format!("{path}[{index}]")
}

/// Two scalar documents compared at the root have no path; render `.`.
fn display_path(path: &str) -> &str {
    if path.is_empty() { "." } else { path }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::decode;

    fn yaml(text: &str) -> Document {
        decode(text.as_bytes()).expect("test yaml must parse")
    }

    #[test]
    fn identical_documents_diff_empty() {
        let doc = yaml("name: nats\nproperties:\n  port: 4222\n  hosts: [a, b]\n");
        assert!(diff(&doc, &doc).is_empty());
    }

    #[test]
    fn scalar_change_names_path_and_both_values() {
        let a = yaml("version: \"1.2\"\n");
        let b = yaml("version: \"1.3\"\n");
        assert_eq!(diff(&a, &b), ["version: \"1.2\" != \"1.3\""]);
    }

    #[test]
    fn key_only_on_one_side() {
        let a = yaml("k1: same\nk2: old\n");
        let b = yaml("k1: same\nk3: new\n");
        let lines = diff(&a, &b);
        assert_eq!(lines, ["k2: removed", "k3: added"]);
    }

    #[test]
    fn nested_paths_are_dotted() {
        let a = yaml("properties:\n  nats:\n    port: 4222\n");
        let b = yaml("properties:\n  nats:\n    port: 4223\n");
        assert_eq!(diff(&a, &b), ["properties.nats.port: 4222 != 4223"]);
    }

    #[test]
    fn sequence_elements_compare_positionally() {
        let a = yaml("packages: [nats, golang]\n");
        let b = yaml("packages: [nats, ruby]\n");
        assert_eq!(diff(&a, &b), ["packages[1]: \"golang\" != \"ruby\""]);
    }

    #[test]
    fn sequence_length_mismatch_emits_one_line_per_index() {
        let a = yaml("packages: [nats]\n");
        let b = yaml("packages: [nats, ruby, golang]\n");
        assert_eq!(lines_sorted(diff(&a, &b)), ["packages[1]: added", "packages[2]: added"]);

        let back = diff(&b, &a);
        assert_eq!(lines_sorted(back), ["packages[1]: removed", "packages[2]: removed"]);
    }

    #[test]
    fn shape_mismatch_is_a_single_line() {
        let a = yaml("templates:\n  - one\n  - two\n");
        let b = yaml("templates:\n  count: 2\n");
        assert_eq!(diff(&a, &b), ["templates: <sequence[2]> != <mapping{1}>"]);
    }

    #[test]
    fn no_cross_type_scalar_coercion() {
        let a = yaml("port: 1\n");
        let b = yaml("port: \"1\"\n");
        assert_eq!(diff(&a, &b), ["port: 1 != \"1\""]);
    }

    #[test]
    fn root_scalars_render_dot_path() {
        let a = yaml("42\n");
        let b = yaml("43\n");
        assert_eq!(diff(&a, &b), [".: 42 != 43"]);
    }

    #[test]
    fn output_is_deterministic() {
        let a = yaml("z: 1\nm: {x: 1, a: 2}\nb: [1, 2, 3]\n");
        let b = yaml("z: 2\nm: {x: 9, c: 2}\nb: [1, 9]\n");
        let first = diff(&a, &b);
        let second = diff(&a, &b);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    fn lines_sorted(mut lines: Vec<String>) -> Vec<String> {
        lines.sort();
        lines
    }
}
