#![forbid(unsafe_code)]

/// `embed_migrations!` cannot signal that it should rerun when only the
/// migration files change, so the build script tracks the directory instead.
fn main() {
    println!("cargo:rerun-if-changed=./migrations");
}
