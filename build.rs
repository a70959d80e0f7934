use std::{env, fs, path::PathBuf};

use cfg_aliases::cfg_aliases;

fn main() {
    cfg_aliases! {
        // Bare-metal Cortex-M build, where `cortex_m::asm` is available.
        cortex_m_target: { all(target_arch = "arm", target_os = "none") },
    }

    // Put the memory layout somewhere the linker can find it.
    let out = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    fs::write(out.join("memory.x"), include_bytes!("memory.x")).expect("unable to write memory.x");
    println!("cargo:rustc-link-search={}", out.display());

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=memory.x");
}
