pub mod rag_error;
