use glib_build_tools::compile_resources;

fn main() {
    let version = env!("CARGO_PKG_VERSION").to_string();

    println!("cargo:rustc-env=APP_VERSION={}", version);

    // Compile the stylesheet into OUT_DIR; main registers it with resources_register_include!
    compile_resources(
        &["resources"],
        "resources/resources.xml",
        "compiled.gresource",
    );

    println!("cargo:rerun-if-changed=resources");
}
