mod file_service_tests;
