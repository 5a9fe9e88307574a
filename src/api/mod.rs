pub mod backoffice;
