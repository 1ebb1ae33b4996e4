#[cfg(test)]
#[macro_use]
mod common;
#[cfg(test)]
mod test_analysis;
#[cfg(test)]
mod test_errors;
