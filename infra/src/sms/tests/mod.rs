mod log_sms_tests;
