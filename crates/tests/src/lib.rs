#[cfg(test)]
mod fixtures;

#[cfg(test)]
mod call_tests;
#[cfg(test)]
mod transcript_tests;
