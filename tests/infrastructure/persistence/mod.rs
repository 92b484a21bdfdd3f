mod in_memory_job_queue_test;
mod pg_job_queue_test;
