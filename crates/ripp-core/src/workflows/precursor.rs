/// Prepends `leader` to every core, preserving core order.
pub fn assemble<S: AsRef<str>>(leader: &str, cores: &[S]) -> Vec<String> {
    cores
        .iter()
        .map(|core| {
            let core = core.as_ref();
            let mut precursor = String::with_capacity(leader.len() + core.len());
            precursor.push_str(leader);
            precursor.push_str(core);
            precursor
        })
        .collect()
}
