mod go;

pub use go::{render_alias, render_comment, render_decls, render_file, render_stub, FileHeader};
