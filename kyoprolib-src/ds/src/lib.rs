use inner::doc_inline_reexport;

doc_inline_reexport! {
    imos,
    ordered_tree,
    union_find,
}
