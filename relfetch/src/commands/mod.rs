pub mod assets;
pub mod repos;
pub mod sync;

/// Accept-all when no filter is given, substring match otherwise.
pub fn name_filter(filter: Option<&str>) -> impl Fn(&str) -> bool + '_ {
    move |full_name: &str| filter.is_none_or(|needle| full_name.contains(needle))
}
