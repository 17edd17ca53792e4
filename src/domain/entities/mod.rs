pub mod document_record;
