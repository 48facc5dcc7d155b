fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Build date reported by `tablekit::BUILD_DATE`
    let build_date = chrono::Utc::now()
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string();
    println!("cargo:rustc-env=BUILD_DATE={}", build_date);
}
