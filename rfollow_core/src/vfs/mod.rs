pub mod archive;
pub mod local;

#[cfg(test)]
mod tests_archive;

#[cfg(test)]
mod tests_local;

pub use archive::ZipVfs;
pub use local::LocalVfs;
