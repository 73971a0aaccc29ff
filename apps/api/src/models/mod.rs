pub mod syllabus;
