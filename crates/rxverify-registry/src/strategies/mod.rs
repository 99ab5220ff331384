//! Per-college verification strategies.
//!
//! One module per provincial college. Each strategy wires a
//! [`DirectoryProbe`](crate::directory::DirectoryProbe) with that college's
//! search page, selectors and status vocabulary; a few add college-specific
//! handling around the probe.

pub mod ab;
pub mod bc;
pub mod mb;
pub mod nb;
pub mod nl;
pub mod ns;
pub mod on;
pub mod pe;
pub mod qc;
pub mod sk;

pub use ab::AlbertaStrategy;
pub use bc::BritishColumbiaStrategy;
pub use mb::ManitobaStrategy;
pub use nb::NewBrunswickStrategy;
pub use nl::NewfoundlandLabradorStrategy;
pub use ns::NovaScotiaStrategy;
pub use on::OntarioStrategy;
pub use pe::PrinceEdwardIslandStrategy;
pub use qc::QuebecStrategy;
pub use sk::SaskatchewanStrategy;
