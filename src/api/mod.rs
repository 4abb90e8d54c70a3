// Remote API clients
pub mod llm;
pub mod youtube;

#[cfg(test)]
pub mod fakes;
