pub mod features;
pub mod init;
pub mod preview;
pub mod run;
pub mod trial;
