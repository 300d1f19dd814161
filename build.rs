fn main() {
    // Propagate ESP-IDF sysenv (linker args, cfg flags) when building for
    // the target. Host builds (tests, fuzzing) skip it.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
